mod jobs;
mod models;
