//! Two-level public suffixes that must not be treated as registrable domains.

/// Sorted by country code, then second-level label.
const TWO_LEVEL_SUFFIXES: &[&str] = &[
    "com.ar", "gob.ar", "net.ar", "org.ar",
    "co.at", "or.at",
    "asn.au", "com.au", "edu.au", "gov.au", "id.au", "net.au", "org.au",
    "com.br", "edu.br", "gov.br", "net.br", "org.br",
    "ac.cn", "com.cn", "edu.cn", "gov.cn", "net.cn", "org.cn",
    "com.co", "net.co", "org.co",
    "com.eg",
    "com.es", "nom.es", "org.es",
    "com.hk", "edu.hk", "gov.hk", "idv.hk", "net.hk", "org.hk",
    "ac.id", "co.id", "or.id", "web.id",
    "ac.il", "co.il", "net.il", "org.il",
    "ac.in", "co.in", "edu.in", "firm.in", "gen.in", "gov.in", "ind.in", "net.in", "org.in", "res.in",
    "ac.jp", "ad.jp", "co.jp", "ed.jp", "go.jp", "gr.jp", "lg.jp", "ne.jp", "or.jp",
    "ac.kr", "co.kr", "go.kr", "ne.kr", "or.kr", "re.kr",
    "com.mx", "edu.mx", "gob.mx", "net.mx", "org.mx",
    "com.my", "net.my", "org.my",
    "com.ng",
    "ac.nz", "co.nz", "geek.nz", "govt.nz", "net.nz", "org.nz", "school.nz",
    "com.pe",
    "com.ph", "net.ph", "org.ph",
    "com.pk",
    "com.pl", "net.pl", "org.pl",
    "com.sa",
    "com.sg", "edu.sg", "gov.sg", "net.sg", "org.sg",
    "ac.th", "co.th", "in.th",
    "com.tr", "gen.tr", "net.tr", "org.tr", "web.tr",
    "com.tw", "edu.tw", "gov.tw", "idv.tw", "net.tw", "org.tw",
    "com.ua", "net.ua", "org.ua",
    "ac.uk", "co.uk", "gov.uk", "ltd.uk", "me.uk", "net.uk", "nhs.uk", "org.uk", "plc.uk", "police.uk", "sch.uk",
    "com.ve",
    "com.vn", "net.vn",
    "ac.za", "co.za", "gov.za", "net.za", "org.za", "web.za",
];

/// True if `second.top` (e.g. `co` + `uk`) is a two-level public suffix.
pub(super) fn is_two_level_suffix(second: &str, top: &str) -> bool {
    TWO_LEVEL_SUFFIXES.iter().any(|suffix| {
        suffix
            .split_once('.')
            .is_some_and(|(s, t)| s == second && t == top)
    })
}
