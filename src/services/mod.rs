pub mod watch_form;
