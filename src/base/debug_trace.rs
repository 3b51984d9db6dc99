macro_rules! trace {
    ( @token $token:expr ) => {
        #[cfg(feature = "debug_trace")]
        println!("@token: {:?}", $token);
    };

    ( @error $span:expr, $raw:expr ) => {
        #[cfg(feature = "debug_trace")]
        println!("@error {:?}: {:?}", $span, $raw);
    };

    ( @filter $filter:expr, $token:expr ) => {
        #[cfg(feature = "debug_trace")]
        println!("@filter {}: {:?}", $filter, $token);
    };

    ( @reserialize $serialized:expr ) => {
        #[cfg(feature = "debug_trace")]
        println!("@reserialize: {:?}", $serialized);
    };
}
