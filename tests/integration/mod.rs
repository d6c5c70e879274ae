//! Integration tests for the shipit binary
//!
//! Each test builds a throwaway npm-style project in a temp directory and
//! drives the real binary against it. Build and publish tools are replaced
//! with small shell scripts, so no compiler or registry is ever touched.


mod test_run;
