//! Dynamic loading mode flags.
//!
//! Pure-logic validation for the flags handed to the platform loader.
//! The actual `dlopen`/`LoadLibrary` calls live in `hrexx-loader`.

/// dlopen mode flags.
pub const RTLD_LAZY: i32 = 0x00001;
pub const RTLD_NOW: i32 = 0x00002;
pub const RTLD_GLOBAL: i32 = 0x00100;
pub const RTLD_LOCAL: i32 = 0x00000;
pub const RTLD_NOLOAD: i32 = 0x00004;
pub const RTLD_NODELETE: i32 = 0x01000;

/// Valid binding mode bits (exactly one of LAZY or NOW must be set).
const BINDING_MASK: i32 = RTLD_LAZY | RTLD_NOW;

/// Valid modifier bits.
const MODIFIER_MASK: i32 = RTLD_GLOBAL | RTLD_LOCAL | RTLD_NOLOAD | RTLD_NODELETE;

/// Returns `true` if `flags` represent a valid dlopen mode.
///
/// POSIX requires exactly one of RTLD_LAZY or RTLD_NOW to be set.
#[inline]
pub fn valid_flags(flags: i32) -> bool {
    let binding = flags & BINDING_MASK;
    let modifiers = flags & !BINDING_MASK;
    (binding == RTLD_LAZY || binding == RTLD_NOW) && (modifiers & !MODIFIER_MASK) == 0
}

/// Loader mode passed to `open`.
///
/// Values use the glibc bit layout; the Unix loader translates them to the
/// host's `libc::RTLD_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadFlags(i32);

impl LoadFlags {
    /// Resolve every undefined symbol at load time.
    pub const NOW: Self = Self(RTLD_NOW);
    /// Resolve function symbols on first call.
    pub const LAZY: Self = Self(RTLD_LAZY);

    /// Wrap raw flag bits without validating them.
    #[must_use]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> i32 {
        self.0
    }

    /// Add `RTLD_GLOBAL` so later libraries can see this one's symbols.
    #[must_use]
    pub const fn global(self) -> Self {
        Self(self.0 | RTLD_GLOBAL)
    }

    #[must_use]
    pub const fn is_lazy(self) -> bool {
        self.0 & BINDING_MASK == RTLD_LAZY
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        valid_flags(self.0)
    }
}

impl Default for LoadFlags {
    fn default() -> Self {
        Self::NOW
    }
}

/// Error message for flags rejected before reaching the OS loader.
pub const ERR_INVALID_FLAGS: &str = "invalid mode for dlopen";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_flags() {
        assert!(valid_flags(RTLD_LAZY));
        assert!(valid_flags(RTLD_NOW));
        assert!(valid_flags(RTLD_LAZY | RTLD_GLOBAL));
        assert!(valid_flags(RTLD_NOW | RTLD_NODELETE));
        assert!(!valid_flags(0));
        assert!(!valid_flags(RTLD_LAZY | RTLD_NOW));
        assert!(!valid_flags(RTLD_LAZY | 0x80000));
    }

    #[test]
    fn test_load_flags_default_is_now() {
        let flags = LoadFlags::default();
        assert_eq!(flags.bits(), RTLD_NOW);
        assert!(!flags.is_lazy());
        assert!(flags.is_valid());
    }

    #[test]
    fn test_load_flags_global_keeps_binding() {
        let flags = LoadFlags::LAZY.global();
        assert!(flags.is_lazy());
        assert!(flags.is_valid());
        assert_eq!(flags.bits() & RTLD_GLOBAL, RTLD_GLOBAL);
    }

    #[test]
    fn test_load_flags_from_bits_rejects_garbage() {
        assert!(!LoadFlags::from_bits(0).is_valid());
        assert!(!LoadFlags::from_bits(RTLD_NOW | 0x40_0000).is_valid());
    }
}
