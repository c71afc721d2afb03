use std::collections::{HashSet, VecDeque};

use super::types::Point;

/// Snake body, head first. `body_set` mirrors `body` for O(1) hit tests.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    pub fn new(head: Point) -> Self {
        Self {
            body: VecDeque::from([head]),
            body_set: HashSet::from([head]),
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    /// Whether moving the head onto `next` hits the body. When not growing
    /// the tail moves out of the way first, so its cell is free.
    pub fn hits_body(&self, next: Point, growing: bool) -> bool {
        self.contains(&next) && (growing || next != self.tail())
    }

    /// Prepends `next` as the new head; drops the tail unless growing.
    pub fn advance(&mut self, next: Point, grow: bool) {
        if !grow {
            let tail = self
                .body
                .pop_back()
                .expect("Snake body should never be empty");
            self.body_set.remove(&tail);
        }
        self.body.push_front(next);
        self.body_set.insert(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_from(cells: &[Point]) -> Snake {
        let mut snake = Snake::new(*cells.last().unwrap());
        for cell in cells.iter().rev().skip(1) {
            snake.advance(*cell, true);
        }
        snake
    }

    #[test]
    fn test_new_snake_is_single_cell() {
        let snake = Snake::new(Point::new(3, 4));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Point::new(3, 4));
        assert_eq!(snake.tail(), Point::new(3, 4));
    }

    #[test]
    fn test_advance_without_growth_keeps_length() {
        let mut snake = snake_from(&[Point::new(2, 0), Point::new(1, 0), Point::new(0, 0)]);
        snake.advance(Point::new(3, 0), false);

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Point::new(3, 0));
        assert!(!snake.contains(&Point::new(0, 0)));
        let cells: Vec<Point> = snake.cells().copied().collect();
        assert_eq!(cells, vec![Point::new(3, 0), Point::new(2, 0), Point::new(1, 0)]);
    }

    #[test]
    fn test_advance_with_growth_keeps_tail() {
        let mut snake = Snake::new(Point::new(0, 0));
        snake.advance(Point::new(1, 0), true);

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.tail(), Point::new(0, 0));
        assert!(snake.contains(&Point::new(0, 0)));
    }

    #[test]
    fn test_vacated_tail_is_not_a_hit() {
        let snake = snake_from(&[
            Point::new(1, 1),
            Point::new(1, 0),
            Point::new(0, 0),
            Point::new(0, 1),
        ]);
        assert!(!snake.hits_body(Point::new(0, 1), false));
        assert!(snake.hits_body(Point::new(0, 1), true));
        assert!(snake.hits_body(Point::new(1, 0), false));
        assert!(!snake.hits_body(Point::new(2, 1), false));
    }
}
