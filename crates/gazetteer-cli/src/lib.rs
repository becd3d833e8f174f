//! # gazetteer-cli
//!
//! Builds, inspects and queries the city/state artifacts produced by
//! `gazetteer-core`. Everything lives in the `gazetteer-cli` binary; this
//! target only carries the command overview.
//!
//! A typical session builds once and then queries the mapped artifacts:
//!
//! ```text
//! gazetteer-cli build --cities cities.json.gz --states states.json --out data/
//! gazetteer-cli verify --dir data/
//! gazetteer-cli lookup state "OH USA" --dir data/
//! gazetteer-cli -v resolve "Dayton Ohio" "NYC" --dir data/
//! ```
//!
//! `resolve` prints one `city<TAB>state` line per input, leaving a
//! missing side empty. Thresholds come from `--config <file.json>`; see
//! `gazetteer_core::GazetteerConfig` for the fields.
#![cfg_attr(docsrs, feature(doc_cfg))]
