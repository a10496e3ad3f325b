mod feed_tests;
