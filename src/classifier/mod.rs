pub mod commit_classifier;

pub use commit_classifier::{
    Buckets, ClassificationResult, CommitClassifier, Entry, SectionBuckets, INITIAL_RELEASE_NOTE,
};
