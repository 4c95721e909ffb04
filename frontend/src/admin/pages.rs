pub mod add_new;
pub mod dashboard;
pub mod login;
pub mod movie_of_week;
pub mod movies;
pub mod settings;
