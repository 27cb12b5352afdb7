//! Allocation engine - single-floor preference with multi-floor fallback
//!
//! The policy is deliberately "good enough" rather than optimal: floor
//! choice among qualifying candidates is uniform random (fairness over
//! determinism), placement walks contiguous vacant runs in ascending
//! number order, and overflow is fragmented greedily across floors.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::allocation::history::AllocationMap;
use crate::core::error::{Result, WardenError};
use crate::core::types::RollNumber;
use crate::hostel::registry::Hostel;
use crate::hostel::room::ROOM_CAPACITY;

/// A single group may never require more than this many rooms.
pub const MAX_GROUP_ROOMS: usize = 15;

/// Allocate one room per roll number, mutating `hostel` in place.
///
/// Preconditions are checked before any state change. On
/// `CapacityExhausted` the rooms claimed by earlier fallback iterations
/// stay committed; the error reports exactly which rolls were placed and
/// which were not.
pub fn allocate<R: Rng>(
    hostel: &mut Hostel,
    group_size: usize,
    rolls: &[RollNumber],
    rng: &mut R,
) -> Result<AllocationMap> {
    if rolls.len() != group_size {
        return Err(WardenError::InvalidRequest(format!(
            "group size {} does not match {} roll numbers",
            group_size,
            rolls.len()
        )));
    }
    if group_size < 1 || group_size > MAX_GROUP_ROOMS {
        return Err(WardenError::InvalidRequest(format!(
            "group size must be between 1 and {}, got {}",
            MAX_GROUP_ROOMS, group_size
        )));
    }
    for (i, roll) in rolls.iter().enumerate() {
        if rolls[..i].contains(roll) {
            return Err(WardenError::InvalidRequest(format!(
                "duplicate roll number: {}",
                roll
            )));
        }
    }

    // Randomize labeling order so no roll is systematically first pick.
    // This affects which roll gets which room, never which rooms are used.
    let mut queue: Vec<RollNumber> = rolls.to_vec();
    queue.shuffle(rng);

    let mut allocation = AllocationMap::new();

    if !try_single_floor(hostel, &mut queue, &mut allocation, rng) {
        multi_floor(hostel, &mut queue, &mut allocation, rng)?;
    }

    debug!(rooms = allocation.len(), "allocation complete");
    Ok(allocation)
}

/// Try to seat the whole group on one floor with enough raw capacity.
///
/// Returns true only if every queued roll was placed.
fn try_single_floor<R: Rng>(
    hostel: &mut Hostel,
    queue: &mut Vec<RollNumber>,
    allocation: &mut AllocationMap,
    rng: &mut R,
) -> bool {
    let needed_slots = queue.len() * ROOM_CAPACITY;
    let candidates: Vec<String> = hostel
        .floors_with_availability()
        .into_iter()
        .filter(|(_, slots)| *slots >= needed_slots)
        .map(|(floor_id, _)| floor_id)
        .collect();

    let Some(floor_id) = candidates.choose(rng).cloned() else {
        debug!(rooms = queue.len(), "no single floor can hold the group");
        return false;
    };

    debug!(floor = %floor_id, rooms = queue.len(), "attempting single-floor placement");
    let limit = queue.len();
    let placed = place_on_floor(hostel, &floor_id, queue, limit, allocation);
    queue.drain(..placed);
    queue.is_empty()
}

/// Greedy overflow path: fragment the remaining group across floors,
/// refreshing availability each iteration.
fn multi_floor<R: Rng>(
    hostel: &mut Hostel,
    queue: &mut Vec<RollNumber>,
    allocation: &mut AllocationMap,
    rng: &mut R,
) -> Result<()> {
    while !queue.is_empty() {
        // Only floors that can still supply at least one whole room
        let candidates: Vec<(String, usize)> = hostel
            .floors_with_availability()
            .into_iter()
            .filter(|(_, slots)| *slots >= ROOM_CAPACITY)
            .collect();

        let Some((floor_id, slots)) = candidates.choose(rng).cloned() else {
            warn!(unplaced = queue.len(), "hostel capacity exhausted mid-allocation");
            return Err(WardenError::CapacityExhausted {
                placed: allocation.clone(),
                unplaced: queue.clone(),
            });
        };

        let take = (slots / ROOM_CAPACITY).min(queue.len());
        debug!(floor = %floor_id, rooms = take, "placing overflow on floor");
        let placed = place_on_floor(hostel, &floor_id, queue, take, allocation);
        if placed == 0 {
            // Availability said the floor could take a room but the walk
            // claimed none; bail out rather than spin.
            warn!(floor = %floor_id, "floor supplied no rooms despite reported availability");
            return Err(WardenError::CapacityExhausted {
                placed: allocation.clone(),
                unplaced: queue.clone(),
            });
        }
        queue.drain(..placed);
    }
    Ok(())
}

/// Walk the floor's contiguous vacant runs in ascending number order,
/// claiming each fully-empty room for the next queued roll. Returns how
/// many rolls were placed (taken from the front of `queue`).
fn place_on_floor(
    hostel: &mut Hostel,
    floor_id: &str,
    queue: &[RollNumber],
    limit: usize,
    allocation: &mut AllocationMap,
) -> usize {
    let Some(floor) = hostel.floor_mut(floor_id) else {
        return 0;
    };

    let runs = floor.contiguous_runs();
    let mut placed = 0;
    for run in runs {
        for number in run {
            if placed >= limit {
                return placed;
            }
            let Some(room) = floor.room_mut(number) else {
                continue;
            };
            if room.claim(&queue[placed]) {
                debug!(room = %room.room_id(), roll = %queue[placed], "claimed room");
                allocation.insert(queue[placed].clone(), room.room_id());
                placed += 1;
            }
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hostel::layout::{BuildingLayout, FloorLayout, HostelLayout};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tiny_layout(floors: &[(&str, &[u16])]) -> HostelLayout {
        HostelLayout {
            buildings: vec![BuildingLayout {
                code: "T".to_string(),
                floors: floors
                    .iter()
                    .map(|(label, numbers)| FloorLayout {
                        label: label.to_string(),
                        rooms: numbers.iter().map(|n| format!("{:03}", n)).collect(),
                    })
                    .collect(),
            }],
        }
    }

    fn rolls(n: usize) -> Vec<RollNumber> {
        (1..=n).map(|i| format!("R{:03}", i)).collect()
    }

    #[test]
    fn rejects_size_mismatch() {
        let mut hostel = Hostel::from_layout(&HostelLayout::standard()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = allocate(&mut hostel, 3, &rolls(2), &mut rng).unwrap_err();
        assert!(matches!(err, WardenError::InvalidRequest(_)));
    }

    #[test]
    fn rejects_out_of_range_group_sizes() {
        let mut hostel = Hostel::from_layout(&HostelLayout::standard()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let err = allocate(&mut hostel, 0, &[], &mut rng).unwrap_err();
        assert!(matches!(err, WardenError::InvalidRequest(_)));

        let err = allocate(&mut hostel, 16, &rolls(16), &mut rng).unwrap_err();
        assert!(matches!(err, WardenError::InvalidRequest(_)));

        // Nothing was touched
        assert_eq!(hostel.floors_with_availability().len(), 6);
        assert_eq!(
            hostel
                .floors_with_availability()
                .iter()
                .map(|(_, s)| s)
                .sum::<usize>(),
            216
        );
    }

    #[test]
    fn rejects_duplicate_rolls() {
        let mut hostel = Hostel::from_layout(&HostelLayout::standard()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let dup = vec!["R001".to_string(), "R001".to_string()];
        let err = allocate(&mut hostel, 2, &dup, &mut rng).unwrap_err();
        assert!(matches!(err, WardenError::InvalidRequest(_)));
    }

    #[test]
    fn single_floor_group_sits_in_one_contiguous_run() {
        // One floor, one long run
        let layout = tiny_layout(&[("1", &[1, 2, 3, 4, 5, 6])]);
        let mut hostel = Hostel::from_layout(&layout).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let allocation = allocate(&mut hostel, 3, &rolls(3), &mut rng).unwrap();

        let mut room_ids: Vec<String> = allocation.values().cloned().collect();
        room_ids.sort();
        assert_eq!(room_ids, vec!["T1-001", "T1-002", "T1-003"]);
    }

    #[test]
    fn fallback_splits_across_floors() {
        // Two floors of 2 rooms each; a 3-room group cannot fit on one
        let layout = tiny_layout(&[("1", &[1, 2]), ("2", &[1, 2])]);
        let mut hostel = Hostel::from_layout(&layout).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let allocation = allocate(&mut hostel, 3, &rolls(3), &mut rng).unwrap();
        assert_eq!(allocation.len(), 3);

        let on_t1 = allocation.values().filter(|id| id.starts_with("T1-")).count();
        let on_t2 = allocation.values().filter(|id| id.starts_with("T2-")).count();
        assert_eq!(on_t1 + on_t2, 3);
        assert!(on_t1 >= 1 && on_t2 >= 1, "group must span both floors");
    }

    #[test]
    fn capacity_exhaustion_reports_partial_outcome() {
        // 2 rooms total, 3 requested
        let layout = tiny_layout(&[("1", &[1, 2])]);
        let mut hostel = Hostel::from_layout(&layout).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let err = allocate(&mut hostel, 3, &rolls(3), &mut rng).unwrap_err();
        match err {
            WardenError::CapacityExhausted { placed, unplaced } => {
                assert_eq!(placed.len(), 2);
                assert_eq!(unplaced.len(), 1);
                // Partial claims stay committed
                assert!(hostel.floors_with_availability().is_empty());
            }
            other => panic!("expected CapacityExhausted, got {:?}", other),
        }
    }

    #[test]
    fn every_roll_gets_exactly_one_room() {
        let mut hostel = Hostel::from_layout(&HostelLayout::standard()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let ids = rolls(15);
        let allocation = allocate(&mut hostel, 15, &ids, &mut rng).unwrap();

        assert_eq!(allocation.len(), 15);
        let mut seen_rooms: Vec<&String> = allocation.values().collect();
        seen_rooms.sort();
        seen_rooms.dedup();
        assert_eq!(seen_rooms.len(), 15, "no room may be assigned twice");
        for roll in &ids {
            assert!(allocation.contains_key(roll));
        }
    }

    #[test]
    fn seeded_runs_are_deterministic() {
        let ids = rolls(5);

        let mut first = Hostel::from_layout(&HostelLayout::standard()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let a = allocate(&mut first, 5, &ids, &mut rng).unwrap();

        let mut second = Hostel::from_layout(&HostelLayout::standard()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let b = allocate(&mut second, 5, &ids, &mut rng).unwrap();

        assert_eq!(a, b);
    }
}
