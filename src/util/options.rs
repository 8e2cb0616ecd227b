use crate::util::constants::{
    DEFAULT_ALIGNED_CHUNK_SIZE, DEFAULT_LARGE_OBJECT_THRESHOLD, MIN_ALIGNED_CHUNK_SIZE,
};
use crate::util::log::{trace, warn};
use std::default::Default;

fn is_valid_chunk_size(v: &usize) -> bool {
    v.is_power_of_two() && *v >= MIN_ALIGNED_CHUNK_SIZE
}

macro_rules! options {
    ($($name:ident: $type:ty[$validator:expr] = $default:expr),*,) => [
        options!($($name: $type[$validator] = $default),*);
    ];
    ($($name:ident: $type:ty[$validator:expr] = $default:expr),*) => [
        #[derive(Clone, Debug)]
        pub struct Options {
            $(pub $name: $type),*
        }
        impl Options {
            /// Set an option by its snake case name. Returns `false` and keeps the old value
            /// if the value cannot be parsed or is invalid.
            pub fn set_from_str(&mut self, s: &str, val: &str)->bool {
                match s {
                    // Parse the given value from str (by env vars or by calling process()) to the right type
                    $(stringify!($name) => if let Ok(ref val) = val.parse::<$type>() {
                        // Validate
                        let validate_fn = $validator;
                        let is_valid = validate_fn(val);
                        if is_valid {
                            // Only set value if valid.
                            self.$name = val.clone();
                        } else {
                            warn!("unable to set {}={:?}. Invalid value. Default value will be used.", s, val);
                        }
                        is_valid
                    } else {
                        warn!("unable to set {}={:?}. Cant parse value. Default value will be used.", s, val);
                        false
                    })*
                    _ => {
                        warn!("unknown option {}", s);
                        false
                    }
                }
            }
        }
        impl Default for Options {
            fn default() -> Self {
                let mut options = Options {
                    $($name: $default),*
                };

                // If we have env vars that start with GREYWALK_ and match any option (such as GREYWALK_ALIGNED_CHUNK_SIZE),
                // we set the option to its value (if it is a valid value). Otherwise, use the default value.
                const PREFIX: &str = "GREYWALK_";
                for (key, val) in std::env::vars() {
                    // strip the prefix, and get the lower case string
                    if let Some(rest_of_key) = key.strip_prefix(PREFIX) {
                        let lowercase: &str = &rest_of_key.to_lowercase();
                        match lowercase {
                            $(stringify!($name) => { options.set_from_str(lowercase, &val); },)*
                            _ => {}
                        }
                    }
                }
                options
            }
        }
    ]
}

options! {
    // The size of an aligned chunk in a chunked space. Must be a power of two and at least one page.
    aligned_chunk_size:     usize [is_valid_chunk_size]   = DEFAULT_ALIGNED_CHUNK_SIZE,
    // Objects larger than this are allocated in their own unaligned chunk.
    large_object_threshold: usize [|v: &usize| *v > 0]    = DEFAULT_LARGE_OBJECT_THRESHOLD,
}

impl Options {
    /// Set an option by its camel case name, e.g. `alignedChunkSize`.
    pub fn set_from_camelcase_str(&mut self, s: &str, val: &str) -> bool {
        trace!("Trying to process option pair: ({}, {})", s, val);

        let mut sr = String::with_capacity(s.len());
        for c in s.chars() {
            if c.is_uppercase() {
                sr.push('_');
                for c in c.to_lowercase() {
                    sr.push(c);
                }
            } else {
                sr.push(c)
            }
        }

        let result = self.set_from_str(sr.as_str(), val);

        if result {
            trace!("Validation passed");
        } else {
            trace!("Validation failed")
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_util::{serial_test, with_cleanup};

    #[test]
    fn no_env_var() {
        serial_test(|| {
            let options = Options::default();
            assert_eq!(options.aligned_chunk_size, DEFAULT_ALIGNED_CHUNK_SIZE);
            assert_eq!(options.large_object_threshold, DEFAULT_LARGE_OBJECT_THRESHOLD);
        })
    }

    #[test]
    fn with_valid_env_var() {
        serial_test(|| {
            with_cleanup(
                || {
                    std::env::set_var("GREYWALK_ALIGNED_CHUNK_SIZE", "8192");

                    let options = Options::default();
                    assert_eq!(options.aligned_chunk_size, 8192);
                },
                || {
                    std::env::remove_var("GREYWALK_ALIGNED_CHUNK_SIZE");
                },
            )
        })
    }

    #[test]
    fn with_multiple_valid_env_vars() {
        serial_test(|| {
            with_cleanup(
                || {
                    std::env::set_var("GREYWALK_LARGE_OBJECT_THRESHOLD", "4096");
                    std::env::set_var("GREYWALK_ALIGNED_CHUNK_SIZE", "65536");

                    let options = Options::default();
                    assert_eq!(options.large_object_threshold, 4096);
                    assert_eq!(options.aligned_chunk_size, 65536);
                },
                || {
                    std::env::remove_var("GREYWALK_LARGE_OBJECT_THRESHOLD");
                    std::env::remove_var("GREYWALK_ALIGNED_CHUNK_SIZE");
                },
            )
        })
    }

    #[test]
    fn with_invalid_env_var_value() {
        serial_test(|| {
            with_cleanup(
                || {
                    // not a power of two, so use the default value
                    std::env::set_var("GREYWALK_ALIGNED_CHUNK_SIZE", "5000");

                    let options = Options::default();
                    assert_eq!(options.aligned_chunk_size, DEFAULT_ALIGNED_CHUNK_SIZE);
                },
                || {
                    std::env::remove_var("GREYWALK_ALIGNED_CHUNK_SIZE");
                },
            )
        })
    }

    #[test]
    fn with_unparsable_env_var_value() {
        serial_test(|| {
            with_cleanup(
                || {
                    std::env::set_var("GREYWALK_LARGE_OBJECT_THRESHOLD", "abc");

                    let options = Options::default();
                    assert_eq!(options.large_object_threshold, DEFAULT_LARGE_OBJECT_THRESHOLD);
                },
                || {
                    std::env::remove_var("GREYWALK_LARGE_OBJECT_THRESHOLD");
                },
            )
        })
    }

    #[test]
    fn with_invalid_env_var_key() {
        serial_test(|| {
            with_cleanup(
                || {
                    std::env::set_var("GREYWALK_ABC", "42");

                    let options = Options::default();
                    assert_eq!(options.aligned_chunk_size, DEFAULT_ALIGNED_CHUNK_SIZE);
                },
                || {
                    std::env::remove_var("GREYWALK_ABC");
                },
            )
        })
    }

    #[test]
    fn camelcase_option() {
        serial_test(|| {
            let mut options = Options::default();
            assert!(options.set_from_camelcase_str("alignedChunkSize", "16384"));
            assert_eq!(options.aligned_chunk_size, 16384);
            assert!(!options.set_from_camelcase_str("alignedChunkSize", "1024"));
            assert_eq!(options.aligned_chunk_size, 16384);
            assert!(!options.set_from_camelcase_str("noSuchOption", "1"));
        })
    }
}
