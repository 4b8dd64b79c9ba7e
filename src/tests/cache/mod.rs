mod decision_tests;
