/// How texel indices outside `[0, len)` are resolved.
///
/// Mirrors the address modes exposed by GPU samplers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AddressMode<T> {
    #[default]
    ClampToEdge,
    Repeat,
    /// Mirrored repeat; edge texels are duplicated at each reflection.
    MirrorRepeat,
    /// Indices outside the image read this texel instead.
    ClampToBorder(T),
}

/// Maps a possibly out-of-range texel index into `[0, len)`.
///
/// Returns `None` when the index should read the border texel, and for
/// `len == 0` regardless of mode.
pub fn wrap_index<T>(i: isize, len: usize, mode: &AddressMode<T>) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let n = len as isize;

    match mode {
        AddressMode::ClampToEdge => Some(i.clamp(0, n - 1) as usize),
        AddressMode::Repeat => Some(i.rem_euclid(n) as usize),
        AddressMode::MirrorRepeat => {
            let r = i.rem_euclid(2 * n);
            let idx = if r < n { r } else { 2 * n - 1 - r };
            Some(idx as usize)
        }
        AddressMode::ClampToBorder(_) => {
            if (0..n).contains(&i) {
                Some(i as usize)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AddressMode, wrap_index};

    #[test]
    fn clamp_to_edge_pins_both_ends() {
        let mode = AddressMode::<u8>::ClampToEdge;

        assert_eq!(wrap_index(-3, 5, &mode), Some(0));
        assert_eq!(wrap_index(0, 5, &mode), Some(0));
        assert_eq!(wrap_index(4, 5, &mode), Some(4));
        assert_eq!(wrap_index(5, 5, &mode), Some(4));
        assert_eq!(wrap_index(99, 5, &mode), Some(4));
    }

    #[test]
    fn repeat_wraps_negative_indices() {
        let mode = AddressMode::<u8>::Repeat;

        let cases = [(-6, 4), (-1, 4), (0, 0), (4, 4), (5, 0), (12, 2)];
        for (i, expected) in cases {
            assert_eq!(wrap_index(i, 5, &mode), Some(expected), "index {i}");
        }
    }

    #[test]
    fn mirror_repeat_duplicates_edges() {
        let mode = AddressMode::<u8>::MirrorRepeat;

        let expected_len3 = [2, 1, 0, 0, 1, 2, 2, 1, 0, 0];
        for (i, expected) in (-3..=6).zip(expected_len3) {
            assert_eq!(wrap_index(i, 3, &mode), Some(expected), "index {i}");
        }

        for i in -4..=4 {
            assert_eq!(wrap_index(i, 1, &mode), Some(0));
        }
    }

    #[test]
    fn clamp_to_border_and_empty_axis() {
        let mode = AddressMode::ClampToBorder(7u8);
        assert_eq!(wrap_index(-1, 3, &mode), None);
        assert_eq!(wrap_index(2, 3, &mode), Some(2));
        assert_eq!(wrap_index(3, 3, &mode), None);

        assert_eq!(wrap_index(0, 0, &AddressMode::<u8>::ClampToEdge), None);
        assert_eq!(wrap_index(0, 0, &AddressMode::<u8>::Repeat), None);
    }
}
