pub mod element;
pub mod location;
pub mod title_page;
pub mod screenplay;
pub mod outline_node;
pub mod screenplay_properties;
pub mod conf;

pub use element::{Element, ElementType};
pub use location::{Lighting, SceneLocation};
pub use title_page::TitlePageEntry;
pub use screenplay::Screenplay;
pub use outline_node::{OutlineKind, OutlineNode};
pub use screenplay_properties::{SceneProperties, ScreenplayProperties};
pub use conf::Conf;
