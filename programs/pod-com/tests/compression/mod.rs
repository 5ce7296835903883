mod commit_batch;
