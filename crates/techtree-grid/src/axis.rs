//! Arena-backed doubly-linked lists.
//!
//! A single [`Arena`] can hold many independent lists: links only ever point at slots that were
//! grown from the same list, so a walk never crosses into a neighbouring one.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Prev,
    Next,
}

impl Direction {
    /// Non-negative indices walk `next`, negative ones walk `prev`.
    pub(crate) fn of(index: i32) -> Self {
        if index >= 0 {
            Direction::Next
        } else {
            Direction::Prev
        }
    }
}

#[derive(Debug, Clone)]
struct Link<V> {
    prev: Option<usize>,
    next: Option<usize>,
    value: Option<V>,
}

impl<V> Link<V> {
    fn toward(&self, dir: Direction) -> Option<usize> {
        match dir {
            Direction::Prev => self.prev,
            Direction::Next => self.next,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Arena<V> {
    links: Vec<Link<V>>,
}

impl<V> Default for Arena<V> {
    fn default() -> Self {
        Self { links: Vec::new() }
    }
}

impl<V> Arena<V> {
    pub(crate) fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Allocates a detached link, i.e. the origin of a new list.
    pub(crate) fn push(&mut self, value: Option<V>) -> usize {
        let ix = self.links.len();
        self.links.push(Link {
            prev: None,
            next: None,
            value,
        });
        ix
    }

    /// Walks `|index|` links away from `from`. Returns `None` as soon as a link is missing.
    pub(crate) fn walk(&self, from: usize, index: i32) -> Option<usize> {
        let dir = Direction::of(index);
        let mut cur = from;
        for _ in 0..index.unsigned_abs() {
            cur = self.links[cur].toward(dir)?;
        }
        Some(cur)
    }

    /// Like [`Arena::walk`], but creates every missing link on the way.
    pub(crate) fn walk_or_grow(&mut self, from: usize, index: i32) -> usize {
        let dir = Direction::of(index);
        let mut cur = from;
        for _ in 0..index.unsigned_abs() {
            cur = match self.links[cur].toward(dir) {
                Some(next) => next,
                None => self.grow(cur, dir),
            };
        }
        cur
    }

    fn grow(&mut self, from: usize, dir: Direction) -> usize {
        let ix = self.links.len();
        let link = match dir {
            Direction::Next => {
                self.links[from].next = Some(ix);
                Link {
                    prev: Some(from),
                    next: None,
                    value: None,
                }
            }
            Direction::Prev => {
                self.links[from].prev = Some(ix);
                Link {
                    prev: None,
                    next: Some(from),
                    value: None,
                }
            }
        };
        self.links.push(link);
        ix
    }

    pub(crate) fn value(&self, ix: usize) -> Option<&V> {
        self.links[ix].value.as_ref()
    }

    pub(crate) fn value_mut(&mut self, ix: usize) -> Option<&mut V> {
        self.links[ix].value.as_mut()
    }

    /// Stores `value` at `ix`, returning the previous value if there was one.
    pub(crate) fn replace(&mut self, ix: usize, value: V) -> Option<V> {
        self.links[ix].value.replace(value)
    }

    pub(crate) fn take(&mut self, ix: usize) -> Option<V> {
        self.links[ix].value.take()
    }

    /// Every link of the list containing `origin`, paired with its index relative to `origin`:
    /// first `0, 1, 2, ..` following `next`, then `-1, -2, ..` following `prev`.
    pub(crate) fn span(&self, origin: usize) -> impl Iterator<Item = (i32, usize)> + '_ {
        let forward = std::iter::successors(Some((0, origin)), move |&(i, ix)| {
            self.links[ix].next.map(|next| (i + 1, next))
        });
        let backward = std::iter::successors(
            self.links[origin].prev.map(|prev| (-1, prev)),
            move |&(i, ix)| self.links[ix].prev.map(|prev| (i - 1, prev)),
        );
        forward.chain(backward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_stops_at_missing_links() {
        let mut arena: Arena<u8> = Arena::default();
        let origin = arena.push(None);
        assert_eq!(arena.walk(origin, 0), Some(origin));
        assert_eq!(arena.walk(origin, 1), None);
        assert_eq!(arena.walk(origin, -1), None);
    }

    #[test]
    fn walk_or_grow_links_both_directions() {
        let mut arena: Arena<u8> = Arena::default();
        let origin = arena.push(None);
        let right = arena.walk_or_grow(origin, 3);
        let left = arena.walk_or_grow(origin, -2);

        assert_eq!(arena.walk(origin, 3), Some(right));
        assert_eq!(arena.walk(origin, -2), Some(left));
        assert_eq!(arena.walk(right, -3), Some(origin));
        assert_eq!(arena.walk(left, 2), Some(origin));

        let offsets: Vec<i32> = arena.span(origin).map(|(i, _)| i).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, -1, -2]);
    }

    #[test]
    fn independent_lists_share_an_arena() {
        let mut arena: Arena<u8> = Arena::default();
        let a = arena.push(Some(1));
        let b = arena.push(Some(2));
        arena.walk_or_grow(a, 2);

        assert_eq!(arena.walk(b, 1), None);
        assert_eq!(arena.span(b).count(), 1);
        assert_eq!(arena.span(a).count(), 3);
    }
}
