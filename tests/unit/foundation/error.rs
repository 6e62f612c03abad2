use super::*;

#[test]
fn dimension_mismatch_reports_index_and_both_sizes() {
    let err = SlitscanError::DimensionMismatch {
        index: 3,
        actual: FrameSize {
            width: 640,
            height: 480,
        },
        expected: FrameSize {
            width: 1920,
            height: 1080,
        },
    };

    let msg = err.to_string();
    assert!(msg.contains("frame 3"), "{msg}");
    assert!(msg.contains("640x480"), "{msg}");
    assert!(msg.contains("1920x1080"), "{msg}");
}

#[test]
fn invalid_frame_size_names_the_frame() {
    let err = SlitscanError::InvalidFrameSize {
        index: 7,
        size: FrameSize {
            width: 0,
            height: 32,
        },
    };
    let msg = err.to_string();
    assert!(msg.contains("frame 7"), "{msg}");
    assert!(msg.contains("0x32"), "{msg}");
}

#[test]
fn anyhow_errors_pass_through_transparently() {
    let err: SlitscanError = anyhow::anyhow!("underlying failure").into();
    assert_eq!(err.to_string(), "underlying failure");
}
