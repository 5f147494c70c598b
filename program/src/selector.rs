// Live Draw Engine - Winner selection
use crate::participants::NormalizedParticipants;
use crate::random::RandomSource;

/// Draw up to `winners_count` distinct winners, in reveal order.
///
/// Fisher–Yates over a copy of the roster: for `i` from the last index down
/// to 1, swap `i` with `rng.next_int(i + 1)`, then keep the shuffled prefix.
/// Asking for more winners than participants returns everybody.
pub fn select_winners<R>(
    participants: &NormalizedParticipants,
    winners_count: usize,
    rng: &mut R,
) -> Vec<String>
where
    R: RandomSource + ?Sized,
{
    let mut shuffled = participants.as_slice().to_vec();

    for i in (1..shuffled.len()).rev() {
        let j = rng.next_int(i + 1);
        shuffled.swap(i, j);
    }

    shuffled.truncate(winners_count.min(participants.len()));
    shuffled
}
