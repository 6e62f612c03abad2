use super::*;

struct FakeProbe(Option<u64>);

impl MemoryProbe for FakeProbe {
    fn free_bytes(&self) -> Option<u64> {
        self.0
    }
}

const SIZE: FrameSize = FrameSize {
    width: 2,
    height: 2,
};
// 2 * 2 * 4 bytes per frame.
const PER_FRAME: u64 = 16;

#[test]
fn off_request_stays_off_without_probing() {
    struct PanicProbe;
    impl MemoryProbe for PanicProbe {
        fn free_bytes(&self) -> Option<u64> {
            panic!("the advisor must not probe when caching is off");
        }
    }

    let decision = advise(SIZE, 3, CacheRequest::Off, &PanicProbe);
    assert!(!decision.retain);
    assert!(decision.downgrade.is_none());
}

#[test]
fn force_overrides_any_shortfall() {
    let decision = advise(SIZE, 1_000_000, CacheRequest::Force, &FakeProbe(Some(1)));
    assert!(decision.retain);
    assert!(decision.downgrade.is_none());
}

#[test]
fn insufficient_memory_downgrades_with_advisory() {
    let decision = advise(SIZE, 3, CacheRequest::On, &FakeProbe(Some(PER_FRAME * 3 - 1)));
    assert!(!decision.retain);
    assert_eq!(
        decision.downgrade,
        Some(Downgrade::Insufficient {
            frames: 3,
            needed: PER_FRAME * 3,
            free: PER_FRAME * 3 - 1,
        })
    );
}

#[test]
fn exact_fit_allows_caching() {
    let decision = advise(SIZE, 3, CacheRequest::On, &FakeProbe(Some(PER_FRAME * 3)));
    assert!(decision.retain);
    assert!(decision.downgrade.is_none());
}

#[test]
fn comparison_floors_the_frame_quotient() {
    // floor(47 / 16) = 2 frames fit, 3 are needed.
    let decision = advise(SIZE, 3, CacheRequest::On, &FakeProbe(Some(47)));
    assert!(!decision.retain);
}

#[test]
fn query_failure_downgrades_non_fatally() {
    let decision = advise(SIZE, 3, CacheRequest::On, &FakeProbe(None));
    assert!(!decision.retain);
    assert_eq!(decision.downgrade, Some(Downgrade::QueryFailed));
}

#[test]
fn downgrade_advisory_is_human_readable() {
    let msg = Downgrade::Insufficient {
        frames: 240,
        needed: 1_990_656_000,
        free: 512_000_000,
    }
    .to_string();
    assert!(msg.contains("240 frames"), "{msg}");
    assert!(msg.contains("2.0 GB"), "{msg}");
    assert!(msg.contains("512.0 MB"), "{msg}");
}

#[test]
fn human_bytes_uses_si_units() {
    assert_eq!(human_bytes(0), "0 B");
    assert_eq!(human_bytes(999), "999 B");
    assert_eq!(human_bytes(1_000), "1.0 kB");
    assert_eq!(human_bytes(1_536), "1.5 kB");
    assert_eq!(human_bytes(48_000_000), "48.0 MB");
    assert_eq!(human_bytes(3_200_000_000), "3.2 GB");
}
