mod byte_span_tests;
