//! Generated metadata for published videos.
//!
//! The title is picked at random from a fixed pool each run; description
//! and tags are constant.

use rand::prelude::IndexedRandom;

use qcast_models::{PrivacyStatus, VideoMetadata};

/// Platform category id for published videos (People & Blogs).
pub const CATEGORY_ID: &str = "22";

/// Title pool, one picked per run.
const TITLES: &[&str] = &[
    "Unleash Your Inner Power: A Motivational Journey!",
    "Believe in Yourself: The Path to Success Starts Now!",
    "Never Give Up: Find Your Drive & Conquer Your Goals!",
    "Daily Dose of Motivation: Fuel Your Dreams!",
    "Inspire Your Day: Positive Vibes & Strong Mindset!",
    "Push Your Limits: Transform Your Life Today!",
    "The Power of Positive Thinking: Achieve Anything!",
    "Wake Up & Win: Your Morning Motivation Boost!",
    "Success Mindset: Build Your Empire!",
    "Stay Focused, Stay Strong: Your Ultimate Motivation!",
];

const DESCRIPTION: &str = "\
Welcome to our channel! This video is designed to ignite your inner fire and keep you motivated on your journey to success. \
Remember, every challenge is an opportunity in disguise. Believe in yourself, stay consistent, and never stop chasing your dreams.\n\n\
If you found this video inspiring, please like, share, and subscribe for more motivational content!\n\n\
--- Music & Copyright --- \n\
I do not claim ownership of the background music used in this video. This video is for motivational and entertainment purposes only.\n\n\
--- Searching Tags --- \n\
#Motivation #Inspiration #Success #BelieveInYourself #NeverGiveUp #PositiveVibes #Mindset #GoalSetting #DreamBig #SelfImprovement \
#MotivationalVideo #LifeHacks #Productivity #StayStrong #AchieveGoals #DailyMotivation #FitnessMotivation #StudyMotivation \
#WorkMotivation #InspirationalQuotes #Focus";

const TAGS: &[&str] = &[
    "motivation",
    "inspiration",
    "success",
    "believe in yourself",
    "never give up",
    "positive vibes",
    "mindset",
    "goal setting",
    "dream big",
    "self improvement",
    "motivational video",
    "daily motivation",
    "inspirational quotes",
    "focus",
    "personal growth",
    "achieve goals",
    "productivity tips",
];

/// Generate metadata for one published video.
pub fn generate() -> VideoMetadata {
    let mut rng = rand::rng();
    let title = TITLES
        .choose(&mut rng)
        .copied()
        .unwrap_or(TITLES[0])
        .to_string();

    VideoMetadata {
        title,
        description: DESCRIPTION.to_string(),
        tags: TAGS.iter().map(|t| t.to_string()).collect(),
        category_id: CATEGORY_ID.to_string(),
        privacy: PrivacyStatus::Public,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_title_comes_from_the_pool() {
        let metadata = generate();
        assert!(TITLES.contains(&metadata.title.as_str()));
    }

    #[test]
    fn test_generated_metadata_is_public_with_fixed_category() {
        let metadata = generate();
        assert_eq!(metadata.privacy, PrivacyStatus::Public);
        assert_eq!(metadata.category_id, "22");
        assert!(metadata.tags.contains(&"motivation".to_string()));
        assert!(!metadata.description.is_empty());
    }
}
