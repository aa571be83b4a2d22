// Cached regular expressions for the few fixed patterns the checkers use

mod cache;
