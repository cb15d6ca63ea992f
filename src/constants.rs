pub mod formats {
    /// Wire format for show start and end times.
    pub const DATETIME: &str = "%Y-%m-%d %H:%M:%S";

    pub const DATE: &str = "%Y-%m-%d";

    /// Accepted spellings of a show start time, tried in order.
    pub const START_TIME_INPUTS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
}

pub mod messages {
    pub const NOT_BLANK: &str = "This value should not be blank.";

    pub const POSITIVE: &str = "This value should be positive.";

    pub const INVALID_DATE: &str = "This value is not a valid date.";

    pub const INVALID_DATETIME: &str = "This value is not a valid datetime.";

    pub const INVALID_UUID: &str = "This is not a valid UUID.";
}

pub mod seed {
    pub const GENRES: &[&str] = &[
        "Action",
        "Adventure",
        "Animation",
        "Comedy",
        "Crime",
        "Documentary",
        "Drama",
        "Family",
        "Fantasy",
        "History",
        "Horror",
        "Music",
        "Mystery",
        "Romance",
        "Science Fiction",
        "Thriller",
        "War",
        "Western",
    ];
}
