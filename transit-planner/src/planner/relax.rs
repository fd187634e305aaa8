//! Time-expanded relaxation shared by Dijkstra and A*.
//!
//! The accumulated cost of reaching a stop doubles as the clock: it is the
//! number of minutes since the graph's reference instant, plus any transfer
//! penalties paid on the way. An edge can only be boarded if its departure
//! offset is not earlier than that clock.
//!
//! The cost of continuing from a stop depends on the line the rider arrived
//! on, so labels belong to `(stop, arrived_on)` states rather than stops.
//! Each state keeps every label no other label of that state dominates:
//! one label when minimizing time, a `(changes, cost)` front when
//! minimizing transfers.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::trace;

use crate::domain::{Edge, LineId, StopId};
use crate::graph::ScheduleGraph;

use super::astar::Heuristic;
use super::config::SearchConfig;
use super::objective::Objective;

/// Cost and line changes of one way of reaching a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Label {
    /// Accumulated cost, which is also minutes since the reference instant.
    pub cost: u32,
    /// Line changes made so far.
    pub changes: u32,
}

impl Label {
    const ORIGIN: Label = Label {
        cost: 0,
        changes: 0,
    };

    /// True if `self` can do anything `other` can from the same state.
    ///
    /// Leaving earlier never hurts, since waiting is free to choose. Fewer
    /// changes only matter when they are being minimized.
    fn dominates(&self, other: &Label, objective: Objective) -> bool {
        match objective {
            Objective::Time => self.cost <= other.cost,
            Objective::Transfers => self.changes <= other.changes && self.cost <= other.cost,
        }
    }

    /// Queue key: smallest is expanded first.
    fn key(&self, estimate: u32, objective: Objective) -> (u32, u32) {
        match objective {
            Objective::Time => (self.cost.saturating_add(estimate), self.changes),
            Objective::Transfers => (self.changes, self.cost.saturating_add(estimate)),
        }
    }
}

/// A stop together with the line the rider arrived on.
type State = (StopId, Option<LineId>);

/// One label in the search, linked to the label it was reached from.
#[derive(Debug, Clone)]
struct Node<'g> {
    stop: StopId,
    arrived_on: Option<LineId>,
    label: Label,
    parent: Option<(usize, &'g Edge)>,
}

/// Queue entry. Ties on the key are broken by stop, line, then creation order.
type QueueEntry = Reverse<((u32, u32), StopId, Option<LineId>, usize)>;

/// Costs and paths from one source stop.
///
/// Only settled stops are present. For each, the tree keeps the first
/// label settled there, which is the best one for the objective.
#[derive(Debug, Clone)]
pub struct SearchTree<'g> {
    source: StopId,
    nodes: Vec<Node<'g>>,
    best: HashMap<StopId, usize>,
    settled: usize,
}

impl<'g> SearchTree<'g> {
    /// The stop the search started from.
    pub fn source(&self) -> &StopId {
        &self.source
    }

    fn best_node(&self, stop: &StopId) -> Option<&Node<'g>> {
        self.best.get(stop).and_then(|&i| self.nodes.get(i))
    }

    /// Minimal cost of reaching `stop`, or `None` if unreachable.
    pub fn cost(&self, stop: &StopId) -> Option<u32> {
        self.best_node(stop).map(|n| n.label.cost)
    }

    /// Line changes on the best known way to `stop`.
    pub fn changes(&self, stop: &StopId) -> Option<u32> {
        self.best_node(stop).map(|n| n.label.changes)
    }

    /// The edge used to arrive at `stop`, if any.
    pub fn predecessor(&self, stop: &StopId) -> Option<&'g Edge> {
        self.best_node(stop)
            .and_then(|n| n.parent)
            .map(|(_, edge)| edge)
    }

    /// Edges from the source to `stop` in travel order, or `None` if
    /// `stop` was never settled.
    pub fn path_to(&self, stop: &StopId) -> Option<Vec<&'g Edge>> {
        let mut node = self.best_node(stop)?;
        let mut edges = Vec::new();
        while let Some((parent, edge)) = node.parent {
            edges.push(edge);
            node = self.nodes.get(parent)?;
        }
        edges.reverse();
        Some(edges)
    }

    /// Number of labels taken off the queue and expanded.
    pub fn settled(&self) -> usize {
        self.settled
    }

    /// Number of stops with a finite cost.
    pub fn reached(&self) -> usize {
        self.best.len()
    }
}

/// Parameters of one relaxation run.
pub(crate) struct Relaxation<'g, 'h, H: Heuristic + ?Sized> {
    pub graph: &'g ScheduleGraph,
    pub objective: Objective,
    pub heuristic: &'h H,
    pub config: &'h SearchConfig,
}

impl<'g, H: Heuristic + ?Sized> Relaxation<'g, '_, H> {
    /// Run from `source`, optionally stopping once `target` is settled.
    pub fn run(&self, source: &StopId, target: Option<&StopId>) -> SearchTree<'g> {
        let mut nodes: Vec<Node<'g>> = Vec::new();
        // Undominated labels per state, as indices into `nodes`
        let mut fronts: HashMap<State, Vec<usize>> = HashMap::new();
        let mut best: HashMap<StopId, usize> = HashMap::new();
        let mut settled = 0;
        let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();

        nodes.push(Node {
            stop: source.clone(),
            arrived_on: None,
            label: Label::ORIGIN,
            parent: None,
        });
        fronts.insert((source.clone(), None), vec![0]);
        queue.push(self.entry(&nodes[0], 0));

        while let Some(Reverse((_, current, arrived_on, index))) = queue.pop() {
            let state = (current, arrived_on);
            // Dropped from the front after it was queued
            if !fronts.get(&state).is_some_and(|front| front.contains(&index)) {
                continue;
            }
            let (current, arrived_on) = state;
            let popped = nodes[index].label;

            settled += 1;
            best.entry(current.clone()).or_insert(index);
            if target == Some(&current) {
                break;
            }

            let mut staged = Vec::new();

            for edge in self.graph.edges_from(&current) {
                if edge.offset() < popped.cost {
                    continue;
                }

                let waiting = edge.offset() - popped.cost;
                let changed = arrived_on.as_ref().is_some_and(|line| line != edge.line());
                let change_time = if changed {
                    self.config.transfer_penalty_mins
                } else {
                    0
                };

                let candidate = Label {
                    cost: popped.cost + edge.ride_cost() + waiting + change_time,
                    changes: popped.changes + u32::from(changed),
                };

                let front = fronts
                    .entry((edge.stop().clone(), Some(edge.line().clone())))
                    .or_default();
                if front
                    .iter()
                    .any(|&i| nodes[i].label.dominates(&candidate, self.objective))
                {
                    continue;
                }
                front.retain(|&i| !candidate.dominates(&nodes[i].label, self.objective));

                trace!(
                    from = %current,
                    to = %edge.stop(),
                    line = %edge.line(),
                    cost = candidate.cost,
                    changes = candidate.changes,
                    waiting,
                    "relaxed"
                );

                let next = nodes.len();
                front.push(next);
                nodes.push(Node {
                    stop: edge.stop().clone(),
                    arrived_on: Some(edge.line().clone()),
                    label: candidate,
                    parent: Some((index, edge)),
                });
                staged.push(next);
            }

            for next in staged {
                queue.push(self.entry(&nodes[next], next));
            }
        }

        SearchTree {
            source: source.clone(),
            nodes,
            best,
            settled,
        }
    }

    fn entry(&self, node: &Node<'g>, index: usize) -> QueueEntry {
        let estimate = match self.objective {
            Objective::Time => self.heuristic.estimate(&node.stop),
            Objective::Transfers => 0,
        };
        Reverse((
            node.label.key(estimate, self.objective),
            node.stop.clone(),
            node.arrived_on.clone(),
            index,
        ))
    }
}
