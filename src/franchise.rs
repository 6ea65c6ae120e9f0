// 2.0: the fixed 30-team table. abbreviations follow basketball-reference codes (BRK, CHO, PHO).

/// (abbreviation, full franchise name)
pub const FRANCHISES: [(&str, &str); 30] = [
    ("ATL", "Atlanta Hawks"),
    ("BOS", "Boston Celtics"),
    ("BRK", "Brooklyn Nets"),
    ("CHO", "Charlotte Hornets"),
    ("CHI", "Chicago Bulls"),
    ("CLE", "Cleveland Cavaliers"),
    ("DAL", "Dallas Mavericks"),
    ("DEN", "Denver Nuggets"),
    ("DET", "Detroit Pistons"),
    ("GSW", "Golden State Warriors"),
    ("HOU", "Houston Rockets"),
    ("IND", "Indiana Pacers"),
    ("LAC", "Los Angeles Clippers"),
    ("LAL", "Los Angeles Lakers"),
    ("MEM", "Memphis Grizzlies"),
    ("MIA", "Miami Heat"),
    ("MIL", "Milwaukee Bucks"),
    ("MIN", "Minnesota Timberwolves"),
    ("NOP", "New Orleans Pelicans"),
    ("NYK", "New York Knicks"),
    ("OKC", "Oklahoma City Thunder"),
    ("ORL", "Orlando Magic"),
    ("PHI", "Philadelphia 76ers"),
    ("PHO", "Phoenix Suns"),
    ("POR", "Portland Trail Blazers"),
    ("SAC", "Sacramento Kings"),
    ("SAS", "San Antonio Spurs"),
    ("TOR", "Toronto Raptors"),
    ("UTA", "Utah Jazz"),
    ("WAS", "Washington Wizards"),
];

/// Full franchise name for an abbreviation. Matching is exact: "brk" is not "BRK".
pub fn full_name(abbreviation: &str) -> Option<&'static str> {
    FRANCHISES
        .iter()
        .find(|(abbr, _)| *abbr == abbreviation)
        .map(|(_, name)| *name)
}

pub fn abbreviation(full_name: &str) -> Option<&'static str> {
    FRANCHISES
        .iter()
        .find(|(_, name)| *name == full_name)
        .map(|(abbr, _)| *abbr)
}
