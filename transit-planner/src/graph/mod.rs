//! The schedule graph.
//!
//! Edges are grouped `line → start stop → end stop → edges`, with every
//! bucket sorted by departure offset from the graph's reference instant.
//! Ordered maps keep iteration order stable, which makes searches
//! deterministic.
//!
//! A graph is tied to exactly one reference instant. Use
//! [`ScheduleGraph::rebase`] to obtain a graph for another one.

mod builder;
mod error;

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Edge, LineId, ScheduleTime, Stop, StopId};

pub use builder::{Connection, GraphBuilder, TripRecord};
pub use error::GraphError;

type Neighbours = BTreeMap<StopId, Vec<Edge>>;
type LineStops = BTreeMap<StopId, Neighbours>;

/// Immutable, time-ordered schedule graph.
#[derive(Debug, Clone)]
pub struct ScheduleGraph {
    reference: ScheduleTime,
    lines: BTreeMap<LineId, LineStops>,
    stops: BTreeMap<StopId, Stop>,
    /// Lines with at least one edge departing each stop.
    lines_at: BTreeMap<StopId, Vec<LineId>>,
    adjacency: BTreeMap<StopId, BTreeSet<StopId>>,
    edge_count: usize,
    /// Fastest straight-line speed of any edge, in metres per minute.
    max_speed: Option<f64>,
}

impl ScheduleGraph {
    /// Build a graph from timetable rows for the given reference instant.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::{Coordinates, LineId, ScheduleTime, StopId};
    /// use transit_planner::graph::{ScheduleGraph, TripRecord};
    ///
    /// let record = TripRecord {
    ///     line: LineId::parse("A").unwrap(),
    ///     start: StopId::parse("Stop1").unwrap(),
    ///     end: StopId::parse("Stop2").unwrap(),
    ///     departure: ScheduleTime::parse("08:00").unwrap(),
    ///     arrival: ScheduleTime::parse("08:10").unwrap(),
    ///     start_location: Coordinates::new(51.10, 17.03),
    ///     end_location: Coordinates::new(51.11, 17.04),
    /// };
    ///
    /// let graph = ScheduleGraph::from_records(&[record], ScheduleTime::parse("08:00").unwrap()).unwrap();
    /// assert_eq!(graph.edge_count(), 1);
    /// assert_eq!(graph.stop_count(), 2);
    /// ```
    pub fn from_records(
        records: &[TripRecord],
        reference: ScheduleTime,
    ) -> Result<Self, GraphError> {
        let mut builder = GraphBuilder::new();
        builder.add_records(records);
        builder.build(reference)
    }

    /// Assemble a graph from validated stops and edges.
    fn from_parts(
        reference: ScheduleTime,
        stops: BTreeMap<StopId, Stop>,
        edges: Vec<Edge>,
    ) -> Self {
        let mut lines: BTreeMap<LineId, LineStops> = BTreeMap::new();
        let mut lines_at: BTreeMap<StopId, Vec<LineId>> = BTreeMap::new();
        let mut adjacency: BTreeMap<StopId, BTreeSet<StopId>> = BTreeMap::new();
        let mut max_speed: Option<f64> = None;
        let mut instant_hop = false;
        let edge_count = edges.len();

        for edge in edges {
            if let (Some(from), Some(to)) = (stops.get(edge.start()), stops.get(edge.stop())) {
                let distance = from.distance_to(to);
                if edge.ride_cost() == 0 {
                    instant_hop |= distance > 0.0;
                } else {
                    let speed = distance / f64::from(edge.ride_cost());
                    max_speed = Some(max_speed.map_or(speed, |m| m.max(speed)));
                }
            }

            adjacency
                .entry(edge.start().clone())
                .or_default()
                .insert(edge.stop().clone());

            let at_start = lines_at.entry(edge.start().clone()).or_default();
            if !at_start.contains(edge.line()) {
                at_start.push(edge.line().clone());
            }

            lines
                .entry(edge.line().clone())
                .or_default()
                .entry(edge.start().clone())
                .or_default()
                .entry(edge.stop().clone())
                .or_default()
                .push(edge);
        }

        for line_ids in lines_at.values_mut() {
            line_ids.sort();
        }

        let mut graph = Self {
            reference,
            lines,
            stops,
            lines_at,
            adjacency,
            edge_count,
            // An edge covering distance in zero minutes bounds nothing
            max_speed: if instant_hop {
                None
            } else {
                max_speed.filter(|s| *s > 0.0)
            },
        };
        graph.sort_edges();
        graph
    }

    /// Sort every bucket by departure offset, then ride cost.
    ///
    /// The sort is stable, so edges that tie keep insertion order.
    fn sort_edges(&mut self) {
        for stops in self.lines.values_mut() {
            for neighbours in stops.values_mut() {
                for edges in neighbours.values_mut() {
                    edges.sort_by_key(|e| (e.offset(), e.ride_cost()));
                }
            }
        }
    }

    /// A copy of this graph measured against another reference instant.
    pub fn rebase(&self, reference: ScheduleTime) -> Self {
        let mut graph = self.clone();
        graph.reference = reference;
        for stops in graph.lines.values_mut() {
            for neighbours in stops.values_mut() {
                for edges in neighbours.values_mut() {
                    for edge in edges.iter_mut() {
                        *edge = edge.rebased(reference);
                    }
                }
            }
        }
        graph.sort_edges();
        graph
    }

    /// The reference instant all edge offsets are measured from.
    pub fn reference(&self) -> ScheduleTime {
        self.reference
    }

    pub fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    pub fn contains_stop(&self, id: &StopId) -> bool {
        self.stops.contains_key(id)
    }

    /// All known stops, ordered by name.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// All line identifiers, ordered.
    pub fn lines(&self) -> impl Iterator<Item = &LineId> {
        self.lines.keys()
    }

    /// Lines with at least one edge departing `stop`.
    pub fn lines_at(&self, stop: &StopId) -> &[LineId] {
        self.lines_at.get(stop).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Stops reachable from `stop` by one direct edge on any line.
    pub fn neighbors_of<'a>(&'a self, stop: &StopId) -> impl Iterator<Item = &'a StopId> + use<'a> {
        self.adjacency.get(stop).into_iter().flatten()
    }

    /// The sorted edges of one `(line, start, end)` bucket.
    pub fn edges_between(&self, line: &LineId, start: &StopId, end: &StopId) -> &[Edge] {
        self.lines
            .get(line)
            .and_then(|stops| stops.get(start))
            .and_then(|neighbours| neighbours.get(end))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every edge departing `stop`: by line, then neighbour, then offset.
    pub fn edges_from<'a>(&'a self, stop: &StopId) -> impl Iterator<Item = &'a Edge> + use<'a> {
        let lines = self.lines_at(stop);
        let stop = stop.clone();
        lines
            .iter()
            .filter_map(move |line| self.lines.get(line).and_then(|stops| stops.get(&stop)))
            .flat_map(|neighbours| neighbours.values())
            .flatten()
    }

    /// Fastest straight-line speed of any edge, in metres per minute.
    ///
    /// `None` when no edge gives a usable bound, either because no edge
    /// covers distance in positive time or because one covers distance in
    /// zero minutes.
    pub fn max_speed_m_per_min(&self) -> Option<f64> {
        self.max_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;

    fn stop_id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn line(s: &str) -> LineId {
        LineId::parse(s).unwrap()
    }

    fn time(s: &str) -> ScheduleTime {
        ScheduleTime::parse(s).unwrap()
    }

    fn record(line_id: &str, start: &str, end: &str, dep: &str, arr: &str) -> TripRecord {
        TripRecord {
            line: line(line_id),
            start: stop_id(start),
            end: stop_id(end),
            departure: time(dep),
            arrival: time(arr),
            start_location: location(start),
            end_location: location(end),
        }
    }

    /// Stops laid out roughly 1 km apart along a meridian.
    fn location(name: &str) -> Coordinates {
        let index = name.bytes().last().map(|b| f64::from(b - b'0')).unwrap_or(0.0);
        Coordinates::new(51.0 + index * 0.009, 17.0)
    }

    fn sample() -> ScheduleGraph {
        let records = vec![
            record("A", "S1", "S2", "08:30", "08:40"),
            record("A", "S1", "S2", "08:00", "08:10"),
            record("A", "S1", "S2", "08:15", "08:25"),
            record("A", "S2", "S3", "08:45", "08:55"),
            record("B", "S2", "S3", "08:20", "08:30"),
            record("B", "S3", "S4", "08:40", "08:50"),
        ];
        ScheduleGraph::from_records(&records, time("08:00")).unwrap()
    }

    #[test]
    fn buckets_sorted_by_offset() {
        let graph = sample();
        let offsets: Vec<u32> = graph
            .edges_between(&line("A"), &stop_id("S1"), &stop_id("S2"))
            .iter()
            .map(|e| e.offset())
            .collect();
        assert_eq!(offsets, vec![0, 15, 30]);
    }

    #[test]
    fn bucket_sorting_wraps_around_reference() {
        let records = vec![
            record("A", "S1", "S2", "07:00", "07:10"),
            record("A", "S1", "S2", "09:00", "09:10"),
        ];
        let graph = ScheduleGraph::from_records(&records, time("08:00")).unwrap();
        let departures: Vec<ScheduleTime> = graph
            .edges_between(&line("A"), &stop_id("S1"), &stop_id("S2"))
            .iter()
            .map(|e| e.departure())
            .collect();
        // 07:00 is tomorrow's departure relative to 08:00
        assert_eq!(departures, vec![time("09:00"), time("07:00")]);
    }

    #[test]
    fn equal_offsets_break_ties_by_ride_cost() {
        let records = vec![
            record("A", "S1", "S2", "08:00", "08:20"),
            record("A", "S1", "S2", "08:00", "08:05"),
        ];
        let graph = ScheduleGraph::from_records(&records, time("08:00")).unwrap();
        let rides: Vec<u32> = graph
            .edges_between(&line("A"), &stop_id("S1"), &stop_id("S2"))
            .iter()
            .map(|e| e.ride_cost())
            .collect();
        assert_eq!(rides, vec![5, 20]);
    }

    #[test]
    fn neighbors_are_true_adjacency() {
        let graph = sample();
        let from_s2: Vec<&StopId> = graph.neighbors_of(&stop_id("S2")).collect();
        assert_eq!(from_s2, vec![&stop_id("S3")]);

        // S4 only has incoming edges
        assert_eq!(graph.neighbors_of(&stop_id("S4")).count(), 0);
        // S1 is not a neighbour of S3 even though both are known stops
        assert!(!graph.neighbors_of(&stop_id("S3")).any(|s| s == &stop_id("S1")));
    }

    #[test]
    fn lines_at_stop() {
        let graph = sample();
        assert_eq!(graph.lines_at(&stop_id("S2")), &[line("A"), line("B")]);
        assert_eq!(graph.lines_at(&stop_id("S1")), &[line("A")]);
        assert!(graph.lines_at(&stop_id("S4")).is_empty());
    }

    #[test]
    fn edges_from_iterates_lines_then_offsets() {
        let graph = sample();
        let edges: Vec<(String, u32)> = graph
            .edges_from(&stop_id("S2"))
            .map(|e| (e.line().to_string(), e.offset()))
            .collect();
        assert_eq!(edges, vec![("A".to_string(), 45), ("B".to_string(), 20)]);
    }

    #[test]
    fn counts() {
        let graph = sample();
        assert_eq!(graph.stop_count(), 4);
        assert_eq!(graph.edge_count(), 6);
        assert_eq!(graph.lines().count(), 2);
        assert_eq!(graph.reference(), time("08:00"));
    }

    #[test]
    fn rebase_recomputes_offsets_and_order() {
        let graph = sample();
        let rebased = graph.rebase(time("08:10"));

        assert_eq!(rebased.reference(), time("08:10"));
        let departures: Vec<ScheduleTime> = rebased
            .edges_between(&line("A"), &stop_id("S1"), &stop_id("S2"))
            .iter()
            .map(|e| e.departure())
            .collect();
        assert_eq!(departures, vec![time("08:15"), time("08:30"), time("08:00")]);

        // The source graph is untouched
        assert_eq!(
            graph.edges_between(&line("A"), &stop_id("S1"), &stop_id("S2"))[0].offset(),
            0
        );
    }

    #[test]
    fn max_speed_from_fastest_edge() {
        let graph = sample();
        let speed = graph.max_speed_m_per_min().unwrap();
        // About 1 km in 10 minutes is the fastest hop
        assert!((speed - 100.0).abs() < 5.0, "got {speed}");
    }

    #[test]
    fn instant_hop_disables_speed_bound() {
        let records = vec![
            record("A", "S1", "S2", "08:00", "08:10"),
            record("A", "S2", "S3", "08:20", "08:20"),
        ];
        let graph = ScheduleGraph::from_records(&records, time("08:00")).unwrap();
        assert!(graph.max_speed_m_per_min().is_none());
    }

    #[test]
    fn unknown_stop_has_no_edges() {
        let graph = sample();
        assert_eq!(graph.edges_from(&stop_id("Nowhere")).count(), 0);
        assert!(graph.stop(&stop_id("Nowhere")).is_none());
    }
}
