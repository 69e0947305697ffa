//! CSV persistence for edge lists and rank vectors.
//!
//! The on-disk layout is a flat record file per artifact:
//! `src_book_idx,dst_book_idx,weight` for edges and `book_idx,rank` for
//! rank vectors. Writers and readers are generic over `Write`/`Read` so
//! tests can run against in-memory buffers.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{Edge, EdgeList};

#[derive(Debug, Serialize, Deserialize)]
struct EdgeRow {
    src_book_idx: u32,
    dst_book_idx: u32,
    weight: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct RankRow {
    book_idx: u32,
    rank: f64,
}

/// Write an edge list as headered CSV.
pub fn write_edges<W: Write>(writer: W, edges: &EdgeList) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for e in edges.iter() {
        wtr.serialize(EdgeRow {
            src_book_idx: e.src,
            dst_book_idx: e.dst,
            weight: e.weight,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read an edge list back from headered CSV.
///
/// Rows are re-sorted into canonical order on load, so a hand-edited file
/// still yields a deterministic list.
pub fn read_edges<R: Read>(reader: R) -> Result<EdgeList> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut edges = Vec::new();
    for row in rdr.deserialize() {
        let row: EdgeRow = row?;
        edges.push(Edge::canonical(row.src_book_idx, row.dst_book_idx, row.weight));
    }
    Ok(EdgeList::from_edges(edges))
}

/// Write a rank vector as headered CSV, one row per node index.
pub fn write_ranks<W: Write>(writer: W, scores: &[f64]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (i, &rank) in scores.iter().enumerate() {
        wtr.serialize(RankRow {
            book_idx: i as u32,
            rank,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read a rank vector back from headered CSV.
///
/// Rows may appear in any order; the vector is assembled by index and is
/// as long as the largest index seen.
pub fn read_ranks<R: Read>(reader: R) -> Result<Vec<f64>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows: Vec<RankRow> = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    let len = rows.iter().map(|r| r.book_idx as usize + 1).max().unwrap_or(0);
    let mut scores = vec![0.0; len];
    for row in rows {
        scores[row.book_idx as usize] = row.rank;
    }
    Ok(scores)
}
