#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use retree_format as format;
pub use retree_transform as transform;
