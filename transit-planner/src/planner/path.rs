//! Path reconstruction from a search tree.

use crate::domain::StopId;

use super::relax::SearchTree;
use super::search::{Itinerary, SearchError};

/// Walk predecessor edges back from `destination` to the tree's source.
///
/// # Errors
///
/// Returns [`SearchError::Unreachable`] if the search never settled
/// `destination`.
pub fn reconstruct(tree: &SearchTree<'_>, destination: &StopId) -> Result<Itinerary, SearchError> {
    let unreachable_error = || SearchError::Unreachable {
        from: tree.source().clone(),
        to: destination.clone(),
    };

    let cost = tree.cost(destination).ok_or_else(unreachable_error)?;
    let edges = tree
        .path_to(destination)
        .ok_or_else(unreachable_error)?
        .into_iter()
        .cloned()
        .collect();

    Ok(Itinerary {
        cost,
        edges,
        settled: tree.settled(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, LineId, ScheduleTime};
    use crate::graph::{ScheduleGraph, TripRecord};
    use crate::planner::SearchConfig;
    use crate::planner::dijkstra::dijkstra_tree;

    fn stop_id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn record(line: &str, start: &str, end: &str, dep: &str, arr: &str) -> TripRecord {
        TripRecord {
            line: LineId::parse(line).unwrap(),
            start: stop_id(start),
            end: stop_id(end),
            departure: ScheduleTime::parse(dep).unwrap(),
            arrival: ScheduleTime::parse(arr).unwrap(),
            start_location: Coordinates::new(51.0, 17.0),
            end_location: Coordinates::new(51.0, 17.0),
        }
    }

    fn graph() -> ScheduleGraph {
        let records = vec![
            record("A", "S1", "S2", "08:00", "08:10"),
            record("B", "S2", "S3", "08:20", "08:30"),
            record("C", "S4", "S1", "08:00", "08:10"),
        ];
        ScheduleGraph::from_records(&records, ScheduleTime::parse("08:00").unwrap()).unwrap()
    }

    #[test]
    fn path_in_source_to_destination_order() {
        let graph = graph();
        let tree = dijkstra_tree(&graph, &stop_id("S1"), &SearchConfig::default()).unwrap();
        let itinerary = reconstruct(&tree, &stop_id("S3")).unwrap();

        let hops: Vec<(&str, &str)> = itinerary
            .edges
            .iter()
            .map(|e| (e.start().as_str(), e.stop().as_str()))
            .collect();
        assert_eq!(hops, vec![("S1", "S2"), ("S2", "S3")]);
        assert_eq!(itinerary.cost, 31);
    }

    #[test]
    fn source_to_itself_is_empty() {
        let graph = graph();
        let tree = dijkstra_tree(&graph, &stop_id("S1"), &SearchConfig::default()).unwrap();
        let itinerary = reconstruct(&tree, &stop_id("S1")).unwrap();

        assert!(itinerary.edges.is_empty());
        assert_eq!(itinerary.cost, 0);
    }

    #[test]
    fn no_incoming_edges_is_unreachable() {
        let graph = graph();
        let tree = dijkstra_tree(&graph, &stop_id("S1"), &SearchConfig::default()).unwrap();

        // S4 only has outgoing edges
        let err = reconstruct(&tree, &stop_id("S4")).unwrap_err();
        assert_eq!(
            err,
            SearchError::Unreachable {
                from: stop_id("S1"),
                to: stop_id("S4"),
            }
        );
    }
}
