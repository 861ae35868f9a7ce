#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod mock;

pub use mock::{
    MockCompletionProvider, MockPredictor, MockPredictorConfig, MockReply, create_mock_completion,
    create_mock_predictor,
};
