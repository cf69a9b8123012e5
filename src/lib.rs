//! fzn2ecnf translates FlatZinc models into ECNF theories.
//!
//! The translation is made of three steps:
//! the model is read by a [`FlatZincReader`](fzn::FlatZincReader),
//! then given item by item to a [`Translator`](translation::Translator) which fills an [`EcnfTheory`](ecnf::EcnfTheory),
//! and the theory is finally written.

#![warn(missing_docs)]

pub mod ecnf;

pub mod fzn;

pub mod translation;
