use std::collections::BTreeMap;

use num_traits::Float;

use crate::{coordinate::Ordered, graph::Edge};

/// Returns a key identifying the points of an edge regardless of their direction.
fn undirected_key<T>(edge: &Edge<T>) -> Vec<Ordered<T>>
where
    T: Float,
{
    let forward: Vec<_> = edge.points().iter().copied().map(Ordered).collect();
    let backward: Vec<_> = forward.iter().rev().copied().collect();
    forward.min(backward)
}

/// A collection of edges where coincident edges can be found.
#[derive(Debug)]
pub struct EdgeList<T> {
    edges: Vec<Edge<T>>,
    index: BTreeMap<Vec<Ordered<T>>, usize>,
}

impl<T> Default for EdgeList<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<T> EdgeList<T>
where
    T: Float,
{
    pub fn add(&mut self, edge: Edge<T>) {
        self.index.insert(undirected_key(&edge), self.edges.len());
        self.edges.push(edge);
    }

    /// Returns the position of the edge with the same points as the given one, in either
    /// direction.
    pub fn find_equal_edge(&self, edge: &Edge<T>) -> Option<usize> {
        self.index.get(&undirected_key(edge)).copied()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Edge<T>> {
        self.edges.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge<T>> {
        self.edges.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Edge<T>> {
        self.edges.iter_mut()
    }

    pub fn as_mut_slice(&mut self) -> &mut [Edge<T>] {
        &mut self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn into_vec(self) -> Vec<Edge<T>> {
        self.edges
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Edge, EdgeList, Label, Location};

    #[test]
    fn find_equal_edges() {
        let label = Label::line_of(0, Location::Interior);
        let mut list = EdgeList::default();
        list.add(Edge::new(vec![coord!(0., 0.), coord!(1., 0.), coord!(1., 1.)], label));

        struct Test {
            name: &'static str,
            edge: Edge<f64>,
            want: Option<usize>,
        }

        vec![
            Test {
                name: "same direction",
                edge: Edge::new(vec![coord!(0., 0.), coord!(1., 0.), coord!(1., 1.)], label),
                want: Some(0),
            },
            Test {
                name: "opposite direction",
                edge: Edge::new(vec![coord!(1., 1.), coord!(1., 0.), coord!(0., 0.)], label),
                want: Some(0),
            },
            Test {
                name: "same endpoints through another vertex",
                edge: Edge::new(vec![coord!(0., 0.), coord!(0., 1.), coord!(1., 1.)], label),
                want: None,
            },
        ]
        .into_iter()
        .for_each(|test| {
            assert_eq!(list.find_equal_edge(&test.edge), test.want, "{}", test.name);
        });
    }
}
