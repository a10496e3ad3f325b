mod frame_tests;
