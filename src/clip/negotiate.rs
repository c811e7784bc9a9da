//! Component negotiation.

use crate::ofx::{IMAGE_COMPONENT_ALPHA, IMAGE_COMPONENT_NONE, IMAGE_COMPONENT_RGB, IMAGE_COMPONENT_RGBA};

/// Find the supported component layout nearest to `requested`
///
/// The rules, first match wins:
///
/// 1. a supported `requested` is returned as is
/// 2. a non chromatic (custom) `requested` is returned as is, supported or not
/// 3. RGBA falls back to RGB, then Alpha
/// 4. Alpha falls back to RGBA, then RGB
/// 5. a clip supporting exactly one layout gets that layout
/// 6. otherwise [`IMAGE_COMPONENT_NONE`]
///
/// Dropping alpha is preferred over inventing it.
pub fn find_supported_comp<'a, S, F>(supported: &'a [S], requested: &'a str, is_chromatic: F) -> &'a str
where
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    let is_supported = |comp: &str| supported.iter().any(|s| s.as_ref() == comp);

    if is_supported(requested) {
        return requested;
    }

    // Custom layouts are passed straight through, even when unsupported.
    if !is_chromatic(requested) {
        return requested;
    }

    let fallbacks: &[&'static str] = match requested {
        IMAGE_COMPONENT_RGBA => &[IMAGE_COMPONENT_RGB, IMAGE_COMPONENT_ALPHA],
        IMAGE_COMPONENT_ALPHA => &[IMAGE_COMPONENT_RGBA, IMAGE_COMPONENT_RGB],
        _ => &[],
    };
    if let Some(found) = fallbacks.iter().copied().find(|comp| is_supported(comp)) {
        return found;
    }

    match supported {
        [only] => only.as_ref(),
        _ => IMAGE_COMPONENT_NONE,
    }
}
