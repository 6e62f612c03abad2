use super::*;

#[test]
fn frame_size_displays_as_width_x_height() {
    let size = FrameSize {
        width: 1920,
        height: 1080,
    };
    assert_eq!(size.to_string(), "1920x1080");
}

#[test]
fn bytes_per_frame_is_four_per_pixel() {
    let size = FrameSize {
        width: 2,
        height: 2,
    };
    assert_eq!(size.bytes_per_frame(), 16);

    let large = FrameSize {
        width: 65_536,
        height: 65_536,
    };
    // Exceeds u32: the product must be computed in u64.
    assert_eq!(large.bytes_per_frame(), 4 * 65_536u64 * 65_536u64);
}

#[test]
fn degenerate_sizes_are_detected() {
    assert!(
        FrameSize {
            width: 0,
            height: 2
        }
        .is_degenerate()
    );
    assert!(
        FrameSize {
            width: 2,
            height: 0
        }
        .is_degenerate()
    );
    assert!(
        !FrameSize {
            width: 1,
            height: 1
        }
        .is_degenerate()
    );
}
