pub mod site_server;
