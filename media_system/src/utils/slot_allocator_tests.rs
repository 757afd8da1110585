use super::*;

/// Summary bit g is set exactly when group g is all ones
fn assert_summary_consistent(alloc: &SlotAllocator) {
    for group in 0..MAX_GROUPS {
        let full = alloc.group_bits(group) == u32::MAX;
        let summary = alloc.group_summary() & (1 << group) != 0;
        assert_eq!(full, summary, "summary mismatch for group {}", group);
    }
}

// ============================================================================
// Construction tests
// ============================================================================

#[test]
fn test_new_is_empty() {
    let alloc = SlotAllocator::new(128).unwrap();
    assert!(alloc.is_empty());
    assert_eq!(alloc.len(), 0);
    assert_eq!(alloc.capacity(), 128);
    assert_eq!(alloc.group_count(), 4);
    assert_summary_consistent(&alloc);
}

#[test]
fn test_new_rejects_zero_and_oversized_capacity() {
    assert!(matches!(SlotAllocator::new(0), Err(Error::InitializationFailed(_))));
    assert!(matches!(
        SlotAllocator::new(MAX_CAPACITY + 1),
        Err(Error::InitializationFailed(_))
    ));
    assert!(SlotAllocator::new(MAX_CAPACITY).is_ok());
}

#[test]
fn test_unused_groups_are_marked_full() {
    let alloc = SlotAllocator::new(64).unwrap();
    assert_eq!(alloc.group_bits(0), 0);
    assert_eq!(alloc.group_bits(1), 0);
    assert_eq!(alloc.group_bits(2), u32::MAX);
    assert_eq!(alloc.group_summary(), !0b11);
}

#[test]
fn test_partial_group_tail_is_marked_used() {
    let alloc = SlotAllocator::new(4).unwrap();
    assert_eq!(alloc.group_bits(0), 0xFFFF_FFF0);
    assert_eq!(alloc.group_summary() & 1, 0);
}

// ============================================================================
// Allocation tests
// ============================================================================

#[test]
fn test_sequential_allocate() {
    let mut alloc = SlotAllocator::new(128).unwrap();
    assert_eq!(alloc.allocate(), Some(0));
    assert_eq!(alloc.allocate(), Some(1));
    assert_eq!(alloc.allocate(), Some(2));
    assert_eq!(alloc.len(), 3);
}

#[test]
fn test_single_group_scenario() {
    let mut alloc = SlotAllocator::new(32).unwrap();

    for expected in 0..32 {
        assert_eq!(alloc.allocate(), Some(expected));
    }
    assert_eq!(alloc.group_bits(0), 0xFFFF_FFFF);
    assert_eq!(alloc.group_summary() & 1, 1);

    assert_eq!(alloc.allocate(), None);

    alloc.free(5);
    assert_eq!(alloc.group_bits(0), 0xFFFF_FFFF & !(1 << 5));
    assert_eq!(alloc.group_summary() & 1, 0);

    assert_eq!(alloc.allocate(), Some(5));
    assert_summary_consistent(&alloc);
}

#[test]
fn test_allocation_crosses_groups() {
    let mut alloc = SlotAllocator::new(96).unwrap();
    for _ in 0..32 {
        alloc.allocate();
    }
    assert_eq!(alloc.group_summary() & 1, 1);
    assert_eq!(alloc.allocate(), Some(32));
    assert_summary_consistent(&alloc);
}

#[test]
fn test_exhaustion_with_partial_group() {
    let mut alloc = SlotAllocator::new(4).unwrap();
    for expected in 0..4 {
        assert_eq!(alloc.allocate(), Some(expected));
    }
    assert_eq!(alloc.allocate(), None);
    assert_eq!(alloc.len(), 4);

    alloc.free(2);
    assert_eq!(alloc.allocate(), Some(2));
    assert_eq!(alloc.allocate(), None);
}

#[test]
fn test_full_capacity_exhaustion() {
    let mut alloc = SlotAllocator::new(MAX_CAPACITY).unwrap();
    for expected in 0..MAX_CAPACITY {
        assert_eq!(alloc.allocate(), Some(expected));
    }
    assert_eq!(alloc.group_summary(), u32::MAX);
    assert_eq!(alloc.allocate(), None);

    alloc.free(1000);
    assert_eq!(alloc.allocate(), Some(1000));
}

// ============================================================================
// Free and recycle tests
// ============================================================================

#[test]
fn test_lowest_free_id_is_preferred() {
    let mut alloc = SlotAllocator::new(128).unwrap();
    for _ in 0..70 {
        alloc.allocate();
    }

    alloc.free(65);
    alloc.free(3);
    alloc.free(40);

    assert_eq!(alloc.allocate(), Some(3));
    assert_eq!(alloc.allocate(), Some(40));
    assert_eq!(alloc.allocate(), Some(65));
    assert_eq!(alloc.allocate(), Some(70));
}

#[test]
fn test_free_then_allocate_restores_state() {
    let mut alloc = SlotAllocator::new(64).unwrap();
    for _ in 0..31 {
        alloc.allocate();
    }

    // Next allocation fills group 0 and flips its summary bit
    let before = alloc.clone();
    let id = alloc.allocate().unwrap();
    assert_eq!(id, 31);
    alloc.free(id);
    assert_eq!(alloc, before);

    let id = alloc.allocate().unwrap();
    let id2 = alloc.allocate().unwrap();
    let before = alloc.clone();
    let id3 = alloc.allocate().unwrap();
    alloc.free(id3);
    assert_eq!(alloc, before);
    assert_eq!((id, id2), (31, 32));
}

#[test]
fn test_is_allocated() {
    let mut alloc = SlotAllocator::new(8).unwrap();
    let id = alloc.allocate().unwrap();
    assert!(alloc.is_allocated(id));
    assert!(!alloc.is_allocated(1));
    // Padding bits are not ids
    assert!(!alloc.is_allocated(9));

    alloc.free(id);
    assert!(!alloc.is_allocated(id));
    assert!(alloc.is_empty());
}

// ============================================================================
// Determinism tests
// ============================================================================

#[test]
fn test_always_returns_lowest_unused_id() {
    // Reference model: a plain vector of flags
    let mut alloc = SlotAllocator::new(200).unwrap();
    let mut used = vec![false; 200];
    let mut seed: u32 = 0x1234_5678;

    for _ in 0..2000 {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let live: Vec<u32> = (0..200).filter(|&i| used[i as usize]).collect();

        if seed % 3 == 0 && !live.is_empty() {
            let victim = live[(seed as usize / 3) % live.len()];
            alloc.free(victim);
            used[victim as usize] = false;
        } else {
            let expected = used.iter().position(|&u| !u).map(|i| i as u32);
            let got = alloc.allocate();
            assert_eq!(got, expected);
            if let Some(id) = got {
                used[id as usize] = true;
            }
        }

        assert_summary_consistent(&alloc);
        assert_eq!(alloc.len() as usize, used.iter().filter(|&&u| u).count());
    }
}
