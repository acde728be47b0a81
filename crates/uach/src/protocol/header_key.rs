//! Short wire keys and the canonical UA-CH header names they stand for.
//!
//! The length-bin payload abbreviates every header name to keep the cookie small.
//! The table below is the only translation the decoder performs; it is compiled
//! into `match` arms and constants, so there is no runtime initialization and no
//! way to mutate it.

macro_rules! header_keys {
    (
        $(
            #[doc = $doc:literal]
            $short:literal => $konst:ident = $name:literal;
        )+
    ) => {
        $(
            #[doc = $doc]
            pub const $konst: &str = $name;
        )+

        /// Every `(short key, canonical header name)` pair understood by the decoder.
        pub const HEADER_KEYS: &[(&str, &str)] = &[$(($short, $konst)),+];

        /// Translates a short wire key into its canonical header name.
        ///
        /// Returns `None` for unknown keys, which the decoder then stores verbatim.
        pub fn lookup(short_key: &[u8]) -> Option<&'static str> {
            let Ok(short_key) = std::str::from_utf8(short_key) else {
                return None;
            };
            match short_key {
                $($short => Some($konst),)+
                _ => None,
            }
        }
    };
}

header_keys! {
    /// CPU architecture, e.g. `"x86"` or `"arm"`.
    "arch" => SEC_CH_UA_ARCH = "Sec-CH-UA-Arch";
    /// Architecture bitness, e.g. `"64"`.
    "bt" => SEC_CH_UA_BITNESS = "Sec-CH-UA-Bitness";
    /// Significant brand list with major versions.
    "br" => SEC_CH_UA_BRANDS = "Sec-CH-UA-Brands";
    /// Brand list with full versions.
    "fvl" => SEC_CH_UA_FULL_VERSION_LIST = "Sec-CH-UA-Full-Version-List";
    /// Structured boolean, `?1` on mobile devices.
    "m" => SEC_CH_UA_MOBILE = "Sec-CH-UA-Mobile";
    /// Device model, e.g. `"Pixel 9 Pro"`.
    "md" => SEC_CH_UA_MODEL = "Sec-CH-UA-Model";
    /// Operating system name.
    "p" => SEC_CH_UA_PLATFORM = "Sec-CH-UA-Platform";
    /// Operating system version.
    "pv" => SEC_CH_UA_PLATFORM_VERSION = "Sec-CH-UA-Platform-Version";
    /// Full browser version (deprecated in favour of the full version list).
    "uafv" => SEC_CH_UA_FULL_VERSION = "Sec-CH-UA-Full-Version";
}

/// Reverse lookup: the short wire key used for a canonical header name.
///
/// Header names are matched ASCII case-insensitively, as HTTP header names are.
pub fn short_key(header_name: &str) -> Option<&'static str> {
    HEADER_KEYS.iter().find(|(_, name)| name.eq_ignore_ascii_case(header_name)).map(|(short, _)| *short)
}
