//! Contour assembly.
//!
//! Walks boundary cells through their edge pairs and the adjacency table,
//! chaining crossing vertices into loops.
//!
//! ```text
//!   queue: (cell, edge) tasks, seeded with the entry of every edge pair
//!
//!   pop (cell, edge)
//!     all pairs visited            -> drop
//!     no unvisited pair enters     -> push_back (cell, first unvisited entry)
//!       through `edge`
//!     otherwise                    -> mark pair, append entry/exit vertices,
//!                                     push_front (neighbor, opposite(exit))
//!
//!   a step that does not extend the chain closes the current loop
//! ```
//!
//! Continuations go to the front of the queue, so one chain is followed to
//! its end before any other task runs. A chain that returns to its first
//! cell ends on the vertex it started from, which closes the loop.
//!
//! Saddle cells carry two pairs and so two seeds; the second pair is
//! emitted even when no chain ever walks into it.
//!
//! A missing vertex, or an exit edge without a neighbor, ends the chain
//! early and the partial chain is emitted as an open loop.

use std::collections::VecDeque;

use crate::adjacency::AdjacencyTable;
use crate::constants::{EDGES_PER_CELL, NO_VERTEX};
use crate::topology::{opposite, pair_edge_mask, EdgePair};

/// One unit of work: arrive at `cell` through `edge`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Task {
  pub cell: usize,
  pub edge: u8,
}

/// Chain edge pairs into vertex loops.
///
/// `pairs[b]` are the resolved edge pairs of boundary cell `b`,
/// `cell_vertices` holds `4` vertex indices per boundary cell.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "assemble"))]
pub fn assemble(
  adjacency: &AdjacencyTable,
  cell_vertices: &[i32],
  pairs: &[&[EdgePair]],
) -> Vec<Vec<i32>> {
  debug_assert_eq!(cell_vertices.len(), pairs.len() * EDGES_PER_CELL);

  let mut assembler = Assembler {
    adjacency,
    cell_vertices,
    pairs,
    visited: vec![0; pairs.len()],
    queue: pairs
      .iter()
      .enumerate()
      .flat_map(|(cell, p)| p.iter().map(move |pair| Task { cell, edge: pair.entry }))
      .collect(),
    current: Vec::new(),
    loops: Vec::new(),
  };

  while let Some(task) = assembler.queue.pop_front() {
    if !assembler.step(task) {
      assembler.finish_loop();
    }
  }
  assembler.finish_loop();

  assembler.loops
}

struct Assembler<'a> {
  adjacency: &'a AdjacencyTable,
  cell_vertices: &'a [i32],
  pairs: &'a [&'a [EdgePair]],
  /// Visited edge mask per cell.
  visited: Vec<u8>,
  queue: VecDeque<Task>,
  current: Vec<i32>,
  loops: Vec<Vec<i32>>,
}

impl Assembler<'_> {
  /// Process one task. Returns true when the chain continues.
  fn step(&mut self, task: Task) -> bool {
    let Task { cell, edge } = task;
    let pairs = self.pairs[cell];
    let visited = self.visited[cell];

    let all = pair_edge_mask(pairs);
    if visited & all == all {
      return false;
    }

    let unvisited = |p: &&EdgePair| visited & (1 << p.entry) == 0;
    let Some(&pair) = pairs.iter().filter(unvisited).find(|p| p.entry == edge) else {
      // Entered through an edge this cell does not start from; revisit the
      // cell later as the start of its own chain.
      if let Some(next) = pairs.iter().find(unvisited) {
        self.queue.push_back(Task {
          cell,
          edge: next.entry,
        });
      }
      return false;
    };

    self.visited[cell] |= (1 << pair.entry) | (1 << pair.exit);

    let entry = self.vertex(cell, pair.entry);
    if self.current.last() != Some(&entry) {
      self.current.push(entry);
    }

    let exit = self.vertex(cell, pair.exit);
    self.current.push(exit);
    if exit == NO_VERTEX {
      return false;
    }

    match self.adjacency.neighbor(cell, pair.exit as usize) {
      Some(neighbor) => {
        self.queue.push_front(Task {
          cell: neighbor,
          edge: opposite(pair.exit as usize) as u8,
        });
        true
      }
      None => false,
    }
  }

  #[inline]
  fn vertex(&self, cell: usize, edge: u8) -> i32 {
    self.cell_vertices[cell * EDGES_PER_CELL + edge as usize]
  }

  fn finish_loop(&mut self) {
    if !self.current.is_empty() {
      self.loops.push(std::mem::take(&mut self.current));
    }
  }
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod assemble_test;
