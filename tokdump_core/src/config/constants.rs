pub mod compile_time {
    pub mod arguments {
        /// Maximum number of input files accepted in one invocation
        /// RESOURCE: Bounds the up-front path validation pass
        pub const MAX_FILES_COUNT: usize = 256;
    }

    pub mod file_processing {
        /// Line length used when the compatibility bound is requested
        /// COMPATIBILITY: Longer lines are delivered in chunks of this size
        pub const COMPAT_MAX_LINE_LENGTH: usize = 1023;

        /// Initial capacity of the reusable line buffer
        /// PERFORMANCE: Typical source lines fit without reallocation
        pub const INITIAL_LINE_CAPACITY: usize = 1024;

        /// Capacity of the buffered stdout writer
        pub const OUTPUT_BUFFER_CAPACITY: usize = 64 * 1024;
    }

    pub mod lexical {
        /// Shortest run of spaces collapsed into one grouped token
        pub const MIN_GROUPED_SPACE_RUN: usize = 2;

        /// Label printed for a single space
        pub const SPACE_LABEL: &str = "(SPACE)";

        /// Label printed for a tab
        pub const TAB_LABEL: &str = "(TAB)";

        /// Label printed for a newline
        pub const NEWLINE_LABEL: &str = "(NEWLINE)";
    }

    pub mod logging {
        /// Maximum length of a single log message before truncation
        /// RESOURCE: Keeps pathological paths from flooding stderr
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;

        /// Maximum events retained by the in-memory logger
        /// RESOURCE: Controls memory usage for test capture
        pub const MEMORY_LOGGER_CAPACITY: usize = 10_000;
    }
}
