//! Fixed `:shortcode:` → emoji table.
//!
//! Names follow the GitHub/Slack (gemoji) conventions.

/// Look up the emoji for a shortcode name (without the surrounding colons).
pub fn lookup(name: &str) -> Option<&'static str> {
    SHORTCODES
        .iter()
        .find(|(shortcode, _)| *shortcode == name)
        .map(|(_, emoji)| *emoji)
}

/// Iterate over every known `(shortcode, emoji)` pair.
pub fn shortcodes() -> impl Iterator<Item = (&'static str, &'static str)> {
    SHORTCODES.iter().copied()
}

static SHORTCODES: &[(&str, &str)] = &[
    // Smileys
    ("grinning", "\u{1F600}"),
    ("smiley", "\u{1F603}"),
    ("smile", "\u{1F604}"),
    ("grin", "\u{1F601}"),
    ("laughing", "\u{1F606}"),
    ("satisfied", "\u{1F606}"),
    ("sweat_smile", "\u{1F605}"),
    ("rofl", "\u{1F923}"),
    ("joy", "\u{1F602}"),
    ("slightly_smiling_face", "\u{1F642}"),
    ("upside_down_face", "\u{1F643}"),
    ("wink", "\u{1F609}"),
    ("blush", "\u{1F60A}"),
    ("innocent", "\u{1F607}"),
    ("smiling_face_with_three_hearts", "\u{1F970}"),
    ("heart_eyes", "\u{1F60D}"),
    ("star_struck", "\u{1F929}"),
    ("kissing_heart", "\u{1F618}"),
    ("yum", "\u{1F60B}"),
    ("stuck_out_tongue", "\u{1F61B}"),
    ("stuck_out_tongue_winking_eye", "\u{1F61C}"),
    ("zany_face", "\u{1F92A}"),
    ("money_mouth_face", "\u{1F911}"),
    ("hugs", "\u{1F917}"),
    ("thinking", "\u{1F914}"),
    ("zipper_mouth_face", "\u{1F910}"),
    ("neutral_face", "\u{1F610}"),
    ("expressionless", "\u{1F611}"),
    ("no_mouth", "\u{1F636}"),
    ("smirk", "\u{1F60F}"),
    ("unamused", "\u{1F612}"),
    ("roll_eyes", "\u{1F644}"),
    ("grimacing", "\u{1F62C}"),
    ("relieved", "\u{1F60C}"),
    ("pensive", "\u{1F614}"),
    ("sleepy", "\u{1F62A}"),
    ("sleeping", "\u{1F634}"),
    ("mask", "\u{1F637}"),
    ("nauseated_face", "\u{1F922}"),
    ("sneezing_face", "\u{1F927}"),
    ("hot_face", "\u{1F975}"),
    ("cold_face", "\u{1F976}"),
    ("dizzy_face", "\u{1F635}"),
    ("exploding_head", "\u{1F92F}"),
    ("cowboy_hat_face", "\u{1F920}"),
    ("partying_face", "\u{1F973}"),
    ("sunglasses", "\u{1F60E}"),
    ("nerd_face", "\u{1F913}"),
    ("confused", "\u{1F615}"),
    ("worried", "\u{1F61F}"),
    ("frowning_face", "\u{2639}\u{FE0F}"),
    ("open_mouth", "\u{1F62E}"),
    ("astonished", "\u{1F632}"),
    ("flushed", "\u{1F633}"),
    ("pleading_face", "\u{1F97A}"),
    ("fearful", "\u{1F628}"),
    ("cold_sweat", "\u{1F630}"),
    ("cry", "\u{1F622}"),
    ("sob", "\u{1F62D}"),
    ("scream", "\u{1F631}"),
    ("confounded", "\u{1F616}"),
    ("disappointed", "\u{1F61E}"),
    ("sweat", "\u{1F613}"),
    ("weary", "\u{1F629}"),
    ("tired_face", "\u{1F62B}"),
    ("yawning_face", "\u{1F971}"),
    ("triumph", "\u{1F624}"),
    ("rage", "\u{1F621}"),
    ("angry", "\u{1F620}"),
    ("cursing_face", "\u{1F92C}"),
    ("smiling_imp", "\u{1F608}"),
    ("skull", "\u{1F480}"),
    ("poop", "\u{1F4A9}"),
    ("hankey", "\u{1F4A9}"),
    ("clown_face", "\u{1F921}"),
    ("ghost", "\u{1F47B}"),
    ("alien", "\u{1F47D}"),
    ("robot", "\u{1F916}"),
    ("smiley_cat", "\u{1F63A}"),
    ("see_no_evil", "\u{1F648}"),
    // Hearts and symbols
    ("heart", "\u{2764}\u{FE0F}"),
    ("orange_heart", "\u{1F9E1}"),
    ("yellow_heart", "\u{1F49B}"),
    ("green_heart", "\u{1F49A}"),
    ("blue_heart", "\u{1F499}"),
    ("purple_heart", "\u{1F49C}"),
    ("black_heart", "\u{1F5A4}"),
    ("white_heart", "\u{1F90D}"),
    ("broken_heart", "\u{1F494}"),
    ("sparkling_heart", "\u{1F496}"),
    ("two_hearts", "\u{1F495}"),
    ("100", "\u{1F4AF}"),
    ("boom", "\u{1F4A5}"),
    ("collision", "\u{1F4A5}"),
    ("dizzy", "\u{1F4AB}"),
    ("zzz", "\u{1F4A4}"),
    ("speech_balloon", "\u{1F4AC}"),
    ("sparkles", "\u{2728}"),
    ("star", "\u{2B50}"),
    ("fire", "\u{1F525}"),
    ("zap", "\u{26A1}"),
    ("white_check_mark", "\u{2705}"),
    ("x", "\u{274C}"),
    ("warning", "\u{26A0}\u{FE0F}"),
    ("question", "\u{2753}"),
    ("exclamation", "\u{2757}"),
    // Hands and people
    ("wave", "\u{1F44B}"),
    ("raised_hand", "\u{270B}"),
    ("ok_hand", "\u{1F44C}"),
    ("v", "\u{270C}\u{FE0F}"),
    ("crossed_fingers", "\u{1F91E}"),
    ("+1", "\u{1F44D}"),
    ("thumbsup", "\u{1F44D}"),
    ("-1", "\u{1F44E}"),
    ("thumbsdown", "\u{1F44E}"),
    ("fist", "\u{270A}"),
    ("clap", "\u{1F44F}"),
    ("raised_hands", "\u{1F64C}"),
    ("pray", "\u{1F64F}"),
    ("muscle", "\u{1F4AA}"),
    ("point_up", "\u{261D}\u{FE0F}"),
    ("point_right", "\u{1F449}"),
    ("eyes", "\u{1F440}"),
    ("brain", "\u{1F9E0}"),
    ("facepalm", "\u{1F926}"),
    ("shrug", "\u{1F937}"),
    // Animals and nature
    ("dog", "\u{1F436}"),
    ("cat", "\u{1F431}"),
    ("fox_face", "\u{1F98A}"),
    ("panda_face", "\u{1F43C}"),
    ("unicorn", "\u{1F984}"),
    ("bee", "\u{1F41D}"),
    ("butterfly", "\u{1F98B}"),
    ("snake", "\u{1F40D}"),
    ("dragon", "\u{1F409}"),
    ("turtle", "\u{1F422}"),
    ("penguin", "\u{1F427}"),
    ("crab", "\u{1F980}"),
    ("sunflower", "\u{1F33B}"),
    ("rose", "\u{1F339}"),
    ("cherry_blossom", "\u{1F338}"),
    ("four_leaf_clover", "\u{1F340}"),
    ("evergreen_tree", "\u{1F332}"),
    ("sunny", "\u{2600}\u{FE0F}"),
    ("cloud", "\u{2601}\u{FE0F}"),
    ("rainbow", "\u{1F308}"),
    ("snowflake", "\u{2744}\u{FE0F}"),
    ("crescent_moon", "\u{1F319}"),
    ("earth_americas", "\u{1F30E}"),
    ("ocean", "\u{1F30A}"),
    // Food
    ("apple", "\u{1F34E}"),
    ("banana", "\u{1F34C}"),
    ("avocado", "\u{1F951}"),
    ("pizza", "\u{1F355}"),
    ("hamburger", "\u{1F354}"),
    ("taco", "\u{1F32E}"),
    ("cake", "\u{1F370}"),
    ("birthday", "\u{1F382}"),
    ("cookie", "\u{1F36A}"),
    ("coffee", "\u{2615}"),
    ("tea", "\u{1F375}"),
    ("beer", "\u{1F37A}"),
    ("wine_glass", "\u{1F377}"),
    // Activities and objects
    ("tada", "\u{1F389}"),
    ("confetti_ball", "\u{1F38A}"),
    ("gift", "\u{1F381}"),
    ("trophy", "\u{1F3C6}"),
    ("soccer", "\u{26BD}"),
    ("basketball", "\u{1F3C0}"),
    ("video_game", "\u{1F3AE}"),
    ("art", "\u{1F3A8}"),
    ("musical_note", "\u{1F3B5}"),
    ("guitar", "\u{1F3B8}"),
    ("rocket", "\u{1F680}"),
    ("airplane", "\u{2708}\u{FE0F}"),
    ("car", "\u{1F697}"),
    ("bike", "\u{1F6B2}"),
    ("house", "\u{1F3E0}"),
    ("computer", "\u{1F4BB}"),
    ("iphone", "\u{1F4F1}"),
    ("bulb", "\u{1F4A1}"),
    ("books", "\u{1F4DA}"),
    ("memo", "\u{1F4DD}"),
    ("pencil2", "\u{270F}\u{FE0F}"),
    ("lock", "\u{1F512}"),
    ("key", "\u{1F511}"),
    ("hammer", "\u{1F528}"),
    ("wrench", "\u{1F527}"),
    ("gear", "\u{2699}\u{FE0F}"),
    ("bell", "\u{1F514}"),
    ("moneybag", "\u{1F4B0}"),
    ("gem", "\u{1F48E}"),
    ("crown", "\u{1F451}"),
    ("hourglass", "\u{231B}"),
    ("alarm_clock", "\u{23F0}"),
    ("checkered_flag", "\u{1F3C1}"),
];
