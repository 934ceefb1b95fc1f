//! Localized interface strings.
//!
//! One typed table per [`Locale`]. Templates read fields directly, so a
//! missing translation is a compile error rather than a blank label.

use imex_core::Locale;

/// Interface strings for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    pub nav_home: &'static str,
    pub nav_catalog: &'static str,
    pub nav_projects: &'static str,
    pub nav_about: &'static str,
    pub hero_badge: &'static str,
    pub hero_desc: &'static str,
    pub btn_catalog: &'static str,
    pub cat_title: &'static str,
    /// Empty-state message of the inquiry list.
    pub cart_empty: &'static str,
    pub loading_init: &'static str,
    /// Hint under a technical description that is too short.
    pub hint_too_short: &'static str,
}

const EN: Strings = Strings {
    nav_home: "Home",
    nav_catalog: "Catalog",
    nav_projects: "Projects",
    nav_about: "Company",
    hero_badge: "UZBEKISTAN'S INDUSTRIAL LEADER",
    hero_desc: "We provide a reliable foundation for the infrastructure of tomorrow. Global standards, local expertise.",
    btn_catalog: "Explore Catalog",
    cat_title: "Industrial Arsenal",
    cart_empty: "Your industrial inquiry list is empty.",
    loading_init: "SYSTEM INITIALIZING",
    hint_too_short: "Please describe the requirement in at least 10 characters.",
};

const RU: Strings = Strings {
    nav_home: "Главная",
    nav_catalog: "Каталог",
    nav_projects: "Проекты",
    nav_about: "Компания",
    hero_badge: "ПРОМЫШЛЕННЫЙ ЛИДЕР УЗБЕКИСТАНА",
    hero_desc: "Мы создаем надежный фундамент для инфраструктуры будущего. Мировые стандарты, локальный опыт.",
    btn_catalog: "Открыть каталог",
    cat_title: "Промышленный Арсенал",
    cart_empty: "Ваш список заказа пуст.",
    loading_init: "ИНИЦИАЛИЗАЦИЯ СИСТЕМЫ",
    hint_too_short: "Опишите требование не менее чем в 10 символах.",
};

const UZ: Strings = Strings {
    nav_home: "Asosiy",
    nav_catalog: "Katalog",
    nav_projects: "Loyihalar",
    nav_about: "Kompaniya",
    hero_badge: "O'ZBEKISTON SANOAT YETAKCHISI",
    hero_desc: "Biz ertangi kun infratuzilmasi uchun ishonchli poydevor yaratamiz. Global standartlar, mahalliy tajriba.",
    btn_catalog: "Katalogni ko'rish",
    cat_title: "Sanoat Arsenali",
    cart_empty: "Sizning buyurtma ro'yxatingiz bo'sh.",
    loading_init: "TIZIM YUKLANMOQDA",
    hint_too_short: "Talabni kamida 10 ta belgida tasvirlab bering.",
};

impl Strings {
    /// The table for `locale`.
    #[must_use]
    pub const fn for_locale(locale: Locale) -> &'static Self {
        match locale {
            Locale::En => &EN,
            Locale::Ru => &RU,
            Locale::Uz => &UZ,
        }
    }
}
