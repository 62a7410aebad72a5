mod airlines;
mod clients;
mod flights;
