use stock_charts::core::log::init_logging;

#[test]
fn test_init_logging_only_once() {
    assert!(init_logging(true).is_ok());
    assert!(init_logging(false).is_err());
}
