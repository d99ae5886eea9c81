//! Handshape code to joint rotations.
//!
//! A [`HandCode`] is read from the bracketed interchange blob (or taken from
//! a transcription) and [`pose`] maps it, through the static tables in
//! [`tables`], to adduction/rotation/flexion angles for each finger and thumb
//! bone of a left or right hand.

pub mod codec;
pub mod error;
pub mod render;
pub mod tables;

pub use codec::{pose, HandCode, HandPose, Joint, JointRotation};
pub use error::{HandCodeError, Result};
pub use render::{read_interchange, write_interchange, RenderRequest, HAND_CODE_FILE};
pub use tables::{Finger, Side};
