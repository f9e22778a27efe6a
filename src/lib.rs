#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use jg_codegen as codegen;
pub use jg_encode as encode;
