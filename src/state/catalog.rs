//! Static option catalogs for choice fields

use super::forms::FieldId;

/// A selectable (value, label) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

pub const GENDERS: &[SelectOption] = &[
    opt("male", "Male"),
    opt("female", "Female"),
    opt("other", "Other"),
];

pub const AGE_GROUPS: &[SelectOption] = &[
    opt("20s", "20s"),
    opt("30s", "30s"),
    opt("40s", "40s"),
    opt("50s", "50s"),
    opt("60s+", "60 and over"),
];

pub const OCCUPATIONS: &[SelectOption] = &[
    opt("student", "Student"),
    opt("employee", "Company employee"),
    opt("freelance", "Freelance"),
    opt("other", "Other"),
];

pub const EDUCATION_LEVELS: &[SelectOption] = &[
    opt("high_school", "High school"),
    opt("university", "University"),
    opt("graduate", "Graduate school"),
    opt("other", "Other"),
];

pub const PREFECTURES: &[SelectOption] = &[
    opt("北海道", "Hokkaido"),
    opt("青森県", "Aomori"),
    opt("岩手県", "Iwate"),
    opt("宮城県", "Miyagi"),
    opt("秋田県", "Akita"),
    opt("山形県", "Yamagata"),
    opt("福島県", "Fukushima"),
    opt("茨城県", "Ibaraki"),
    opt("栃木県", "Tochigi"),
    opt("群馬県", "Gunma"),
    opt("埼玉県", "Saitama"),
    opt("千葉県", "Chiba"),
    opt("東京都", "Tokyo"),
    opt("神奈川県", "Kanagawa"),
    opt("新潟県", "Niigata"),
    opt("富山県", "Toyama"),
    opt("石川県", "Ishikawa"),
    opt("福井県", "Fukui"),
    opt("山梨県", "Yamanashi"),
    opt("長野県", "Nagano"),
    opt("岐阜県", "Gifu"),
    opt("静岡県", "Shizuoka"),
    opt("愛知県", "Aichi"),
    opt("三重県", "Mie"),
    opt("滋賀県", "Shiga"),
    opt("京都府", "Kyoto"),
    opt("大阪府", "Osaka"),
    opt("兵庫県", "Hyogo"),
    opt("奈良県", "Nara"),
    opt("和歌山県", "Wakayama"),
    opt("鳥取県", "Tottori"),
    opt("島根県", "Shimane"),
    opt("岡山県", "Okayama"),
    opt("広島県", "Hiroshima"),
    opt("山口県", "Yamaguchi"),
    opt("徳島県", "Tokushima"),
    opt("香川県", "Kagawa"),
    opt("愛媛県", "Ehime"),
    opt("高知県", "Kochi"),
    opt("福岡県", "Fukuoka"),
    opt("佐賀県", "Saga"),
    opt("長崎県", "Nagasaki"),
    opt("熊本県", "Kumamoto"),
    opt("大分県", "Oita"),
    opt("宮崎県", "Miyazaki"),
    opt("鹿児島県", "Kagoshima"),
    opt("沖縄県", "Okinawa"),
];

pub const STATIONS: &[SelectOption] = &[
    opt("新宿駅", "Shinjuku"),
    opt("渋谷駅", "Shibuya"),
    opt("池袋駅", "Ikebukuro"),
    opt("東京駅", "Tokyo"),
    opt("品川駅", "Shinagawa"),
    opt("上野駅", "Ueno"),
    opt("秋葉原駅", "Akihabara"),
    opt("有楽町駅", "Yurakucho"),
    opt("大手町駅", "Otemachi"),
    opt("銀座駅", "Ginza"),
];

pub const INTERESTS: &[SelectOption] = &[
    opt("programming", "Programming"),
    opt("design", "Design"),
    opt("marketing", "Marketing"),
    opt("business", "Business"),
    opt("finance", "Finance"),
    opt("education", "Education"),
    opt("healthcare", "Healthcare"),
    opt("sports", "Sports"),
    opt("music", "Music"),
    opt("art", "Art"),
    opt("travel", "Travel"),
    opt("cooking", "Cooking"),
];

pub const SKILLS: &[SelectOption] = &[
    opt("javascript", "JavaScript"),
    opt("typescript", "TypeScript"),
    opt("react", "React"),
    opt("vue", "Vue.js"),
    opt("angular", "Angular"),
    opt("nodejs", "Node.js"),
    opt("python", "Python"),
    opt("java", "Java"),
    opt("php", "PHP"),
    opt("sql", "SQL"),
    opt("aws", "AWS"),
    opt("docker", "Docker"),
];

pub const CERTIFICATIONS: &[SelectOption] = &[
    opt("toeic", "TOEIC"),
    opt("toefl", "TOEFL"),
    opt("eiken", "Eiken"),
    opt("ipa", "IPA IT Engineer Examination"),
    opt("aws_cert", "AWS Certification"),
    opt("oracle", "Oracle Certification"),
    opt("microsoft", "Microsoft Certification"),
    opt("google", "Google Certification"),
];

pub const HOBBIES: &[SelectOption] = &[
    opt("reading", "Reading"),
    opt("movies", "Movies"),
    opt("music", "Music"),
    opt("sports", "Sports"),
    opt("gaming", "Gaming"),
    opt("cooking", "Cooking"),
    opt("travel", "Travel"),
    opt("photography", "Photography"),
    opt("drawing", "Drawing"),
    opt("gardening", "Gardening"),
];

pub const CONTACT_TIME_SLOTS: &[SelectOption] = &[
    opt("morning", "Morning (8:00-12:00)"),
    opt("afternoon", "Afternoon (12:00-18:00)"),
    opt("evening", "Evening (18:00-21:00)"),
    opt("night", "Night (21:00-23:00)"),
    opt("weekend", "Weekends"),
];

pub const WORK_LOCATIONS: &[SelectOption] = &[
    opt("tokyo", "Tokyo"),
    opt("osaka", "Osaka"),
    opt("nagoya", "Nagoya"),
    opt("fukuoka", "Fukuoka"),
    opt("remote", "Remote"),
    opt("hybrid", "Hybrid"),
];

pub const JOB_TYPES: &[SelectOption] = &[
    opt("frontend", "Frontend development"),
    opt("backend", "Backend development"),
    opt("fullstack", "Full-stack development"),
    opt("mobile", "Mobile development"),
    opt("devops", "DevOps"),
    opt("designer", "Designer"),
    opt("pm", "Project manager"),
    opt("qa", "QA engineer"),
];

/// Options offered for `id`; empty for text and flag fields
pub fn options(id: FieldId) -> &'static [SelectOption] {
    match id {
        FieldId::Gender => GENDERS,
        FieldId::AgeGroup => AGE_GROUPS,
        FieldId::Occupation => OCCUPATIONS,
        FieldId::Education => EDUCATION_LEVELS,
        FieldId::Prefecture => PREFECTURES,
        FieldId::NearestStation => STATIONS,
        FieldId::Interests => INTERESTS,
        FieldId::Skills => SKILLS,
        FieldId::Certifications => CERTIFICATIONS,
        FieldId::Hobbies => HOBBIES,
        FieldId::ContactTimeSlots => CONTACT_TIME_SLOTS,
        FieldId::PreferredWorkLocation => WORK_LOCATIONS,
        FieldId::PreferredJobType => JOB_TYPES,
        _ => &[],
    }
}

/// Display label for a stored value, falling back to the raw value
pub fn label_for(id: FieldId, value: &str) -> &str {
    options(id)
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label)
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FieldKind;
    use std::collections::HashSet;

    #[test]
    fn test_every_choice_field_has_options() {
        for id in FieldId::ALL {
            let has_options = !options(id).is_empty();
            let is_choice = matches!(id.kind(), FieldKind::Choice | FieldKind::Multi);
            assert_eq!(has_options, is_choice, "{id}");
        }
    }

    #[test]
    fn test_values_are_unique_per_catalog() {
        for id in FieldId::ALL {
            let values: HashSet<_> = options(id).iter().map(|o| o.value).collect();
            assert_eq!(values.len(), options(id).len(), "{id}");
        }
    }

    #[test]
    fn test_prefecture_catalog_is_complete() {
        assert_eq!(PREFECTURES.len(), 47);
    }

    #[test]
    fn test_label_for() {
        assert_eq!(label_for(FieldId::Prefecture, "東京都"), "Tokyo");
        assert_eq!(label_for(FieldId::AgeGroup, "60s+"), "60 and over");
        assert_eq!(label_for(FieldId::Skills, "cobol"), "cobol");
    }
}
