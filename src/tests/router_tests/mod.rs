mod approve_tests;
mod google_tests;
mod reviews_tests;
