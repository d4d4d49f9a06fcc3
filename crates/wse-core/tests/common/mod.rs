pub mod sticker_server;
