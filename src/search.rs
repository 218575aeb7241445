//! Generic single-pair A* in the closure-parameterized shape of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! Back-pointers and g-scores share one index-addressed map; f-scores live in
//! the frontier entries.
use crate::frontier::Frontier;
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::trace;
use num_traits::Zero;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Walks the parent chain back from the goal, drops the start cell and
/// reverses. The returned route runs from the cell after the start up to and
/// including the goal.
fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, goal: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = itertools::unfold(goal, |i| {
        parents.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.pop();
    path.reverse();
    path
}

/// A* search from `start` until `success` holds. Returns the route (start
/// excluded) and its accumulated step cost, or [None] once the frontier
/// exhausts without reaching a success node — a normal outcome, not a fault.
///
/// A node already waiting in the frontier is not pushed again when a cheaper
/// way to it is found; the improved g-score is recorded in the map and read
/// back when the stale entry pops, so outdated priorities are harmless.
pub fn shortest_path<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut open: Frontier<C> = Frontier::new();
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    open.push(0, Zero::zero());
    while let Some(index) = open.pop() {
        let (step_list, cost) = {
            let (node, &(_, cost)) = parents.get_index(index).unwrap();
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return Some((path, cost));
            }
            (successors(node), cost)
        };
        for (successor, step_cost) in step_list {
            let new_cost = cost + step_cost;
            let h;
            let n;
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }
            if !open.contains(n) {
                open.push(n, new_cost + h);
            }
        }
    }
    trace!("frontier exhausted before a success node was reached");
    None
}
