use quickcheck::{Arbitrary, Gen};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{GameState, RandomBot};

/// A state reached by random play from the starting position.
///
/// It may be in the middle of a capture chain.
#[derive(Clone, Debug)]
pub struct ReachableState(pub GameState);

impl Arbitrary for ReachableState {
    fn arbitrary(g: &mut Gen) -> Self {
        let seed = u64::arbitrary(g);
        let num_moves = usize::arbitrary(g) % 150;
        let mut bot = RandomBot::new(StdRng::seed_from_u64(seed));
        let mut state = GameState::new();
        for _ in 0..num_moves {
            if state.is_terminal().is_some() {
                break;
            }
            let Ok((from, to)) = bot.choose_move(&state) else {
                break;
            };
            state
                .play(from, to)
                .expect("The bot only chooses legal moves");
        }
        ReachableState(state)
    }
}
