//! Label translations for the form, selected once at startup.

/// Labels for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localization {
    pub code: &'static str,
    /// Placeholder and label of the master password field.
    pub master_password: &'static str,
    /// Placeholder and label of the domain field.
    pub domain: &'static str,
    /// Text of the generate action.
    pub generate: &'static str,
}

const fn entry(
    code: &'static str,
    master_password: &'static str,
    domain: &'static str,
    generate: &'static str,
) -> Localization {
    Localization {
        code,
        master_password,
        domain,
        generate,
    }
}

static LOCALIZATIONS: [Localization; 8] = [
    entry("en", "Master password", "Domain / URL", "Generate"),
    entry("es", "Contraseña maestra", "Dominio / URL", "Enviar"),
    entry("fr", "Mot de passe principal", "Domaine / URL", "Soumettre"),
    entry("de", "Master Passwort", "Domain / URL", "Abschicken"),
    entry("pt-br", "Senha-mestra", "Domínio / URL", "Gerar"),
    entry("zh-hk", "主密碼", "域名 / URL", "提交"),
    entry("hu", "Mesterjelszó", "Tartomány / Internetcím", "OK"),
    entry("ru", "Мастер-пароль", "Домена / URL", "Подтвердить"),
];

/// Look up the labels for a language code (`"pt-BR"` and `"pt-br"` are the same).
pub fn lookup(code: &str) -> Option<&'static Localization> {
    let code = code.trim().to_ascii_lowercase();
    LOCALIZATIONS.iter().find(|l| l.code == code)
}
