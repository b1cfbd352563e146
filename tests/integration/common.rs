//! Common utilities for integration tests
//!
//! `app` stands in for production code that keeps its collaborators
//! swappable through `lookup` and `construct`.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub mod app {
    use depinj::{construct, lookup};

    pub trait Clock {
        fn now(&self) -> u64;
    }

    pub struct SystemClock {
        pub offset: u64,
    }

    impl Clock for SystemClock {
        fn now(&self) -> u64 {
            let elapsed = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            elapsed + self.offset
        }
    }

    pub struct FrozenClock(pub u64);

    impl Clock for FrozenClock {
        fn now(&self) -> u64 {
            self.0
        }
    }

    pub static SYSTEM_CLOCK: SystemClock = SystemClock { offset: 0 };

    pub fn system_clock() -> &'static dyn Clock {
        &SYSTEM_CLOCK
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Connection {
        pub url: String,
        pub pool_size: u32,
    }

    impl Connection {
        pub fn open(url: &str, pool_size: u32) -> Connection {
            Connection {
                url: url.to_string(),
                pool_size,
            }
        }
    }

    pub const DATABASE_URL: &str = "postgres://prod/users";

    pub fn stamp(message: &str) -> String {
        let clock = lookup(system_clock());
        format!("[{}] {}", clock.now(), message)
    }

    pub fn describe_user(id: u32) -> String {
        let connection = construct(Connection::open, (DATABASE_URL, 8));
        format!("user {} via {} ({})", id, connection.url, connection.pool_size)
    }
}
