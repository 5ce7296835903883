pub mod commit_batch;
