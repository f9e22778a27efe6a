// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod encoder_struct;
mod match_encode;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_encode::match_encode_impls;

use auto_register::get_auto_register_impl;
use encoder_struct::impl_encoder;
