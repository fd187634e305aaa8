//! Journey planner over a schedule graph.
//!
//! This module implements the time-dependent shortest-path searches that
//! answer: "leaving this stop at this time, what is the cheapest way to
//! reach that one?"
//!
//! Both engines share one relaxation loop. Dijkstra expands stops in cost
//! order; A* adds a lower bound on the remaining cost to the queue key.

mod astar;
mod config;
mod dijkstra;
mod objective;
mod path;
mod relax;
mod search;


pub use astar::{GeoHeuristic, Heuristic, ZeroHeuristic, astar, astar_with};
pub use config::SearchConfig;
pub use dijkstra::{dijkstra, dijkstra_tree};
pub use objective::{InvalidObjective, Objective};
pub use path::reconstruct;
pub use relax::SearchTree;
pub use search::{Engine, Itinerary, Planner, Query, SearchError};
