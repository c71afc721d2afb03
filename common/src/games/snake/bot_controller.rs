use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::snapshot::GameSnapshot;
use super::types::{Direction, GamePhase, Point, WallCollisionMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeBotType {
    /// Greedy walk towards the food, avoiding cells that end the game at once.
    Efficient,
    /// Uniform pick among the safe turns.
    Random,
}

/// Picks the next direction command for a game from its snapshot alone.
pub struct BotController;

impl BotController {
    pub fn calculate_move(
        bot_type: SnakeBotType,
        snapshot: &GameSnapshot,
        wall_mode: WallCollisionMode,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        if snapshot.phase != GamePhase::Running {
            return None;
        }

        match bot_type {
            SnakeBotType::Efficient => Self::efficient_pathfinding(snapshot, wall_mode, rng),
            SnakeBotType::Random => Self::random_valid_move(snapshot, wall_mode, rng),
        }
    }

    fn efficient_pathfinding(
        snapshot: &GameSnapshot,
        wall_mode: WallCollisionMode,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        let head = snapshot.head();

        let best = Self::safe_directions(snapshot, wall_mode)
            .into_iter()
            .filter_map(|dir| {
                let next = snapshot.field_size.step(head, dir, wall_mode)?;
                Some((dir, Self::distance(next, snapshot.food, snapshot, wall_mode)))
            })
            .min_by_key(|(_, distance)| *distance)
            .map(|(dir, _)| dir);

        best.or_else(|| Self::random_valid_move(snapshot, wall_mode, rng))
    }

    fn random_valid_move(
        snapshot: &GameSnapshot,
        wall_mode: WallCollisionMode,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        let safe = Self::safe_directions(snapshot, wall_mode);
        if safe.is_empty() {
            Some(snapshot.direction)
        } else {
            Some(safe[rng.random_range(0..safe.len())])
        }
    }

    fn safe_directions(snapshot: &GameSnapshot, wall_mode: WallCollisionMode) -> Vec<Direction> {
        let head = snapshot.head();
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&snapshot.direction))
            .filter(|&d| match snapshot.field_size.step(head, d, wall_mode) {
                Some(next) => Self::is_safe_position(next, snapshot),
                None => false,
            })
            .collect()
    }

    fn is_safe_position(pos: Point, snapshot: &GameSnapshot) -> bool {
        // The tail moves away on a plain step; eating keeps it in place.
        let tail_stays = pos == snapshot.food;
        !snapshot.occupies(&pos) || (pos == snapshot.tail() && !tail_stays)
    }

    fn distance(a: Point, b: Point, snapshot: &GameSnapshot, wall_mode: WallCollisionMode) -> usize {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);

        match wall_mode {
            WallCollisionMode::Bounded => dx + dy,
            WallCollisionMode::WrapAround => {
                let min_dx = dx.min(snapshot.field_size.width - dx);
                let min_dy = dy.min(snapshot.field_size.height - dy);
                min_dx + min_dy
            }
        }
    }
}
