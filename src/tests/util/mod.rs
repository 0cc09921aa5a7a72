mod pipe_test;
