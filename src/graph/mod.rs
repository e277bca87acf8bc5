//! Core hypergraph data structures

mod label;
mod model;
mod properties;
mod store;
mod views;


pub use label::{Label, Properties, PropertyValue};
pub use model::{GraphError, GraphResult, Hypergraph};
pub use properties::{PropertyRow, PropertyTable};
pub use store::{EdgeHandle, IncidenceStore, LabelArena, NodeHandle};
pub use views::BipartiteView;
