use lamina_graph::{EdgeId, GraphError};

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("node `{0}` is not part of the layout graph")]
    MissingNode(String),

    #[error("{0} is not part of the layout graph")]
    MissingEdge(EdgeId),

    #[error("node `{0}` has not been assigned a rank")]
    MissingRank(String),

    #[error("node `{0}` has not been assigned an order")]
    MissingOrder(String),

    #[error("no intersection: point ({x}, {y}) is the center of the rectangle")]
    DegenerateIntersection { x: f64, y: f64 },

    #[error("edge `{v}` -> `{w}` is attached to compound node `{node}`")]
    EdgeOnCompoundNode { v: String, w: String, node: String },

    #[error("unknown node `{0}`")]
    UnknownNode(String),

    #[error("node `{0}` is declared more than once")]
    DuplicateNode(String),

    #[error("straighten strength must be in (0, 1], got {0}")]
    InvalidStraighten(f64),

    #[error("brandes-koepf lookup failed for `{0}`")]
    AlignmentLookup(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
