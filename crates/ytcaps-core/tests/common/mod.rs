pub mod watch_server;
